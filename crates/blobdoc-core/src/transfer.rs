//! Moving items between containers and renaming them in place.
//!
//! Both are a backend-side copy followed by a delete of the source. The pair
//! is not atomic: when the copy commits and the delete fails the item exists
//! under both names, which is reported as
//! [`DocError::TransferPartialFailure`] rather than success.

use tracing::{debug, info, instrument, warn};

use crate::error::{DocError, DocResult};
use crate::outcome::TransferReceipt;
use crate::store::DocumentStore;

impl DocumentStore {
    /// Move `item` from container `from` to container `to`, keeping its name.
    ///
    /// The destination container is created if absent. Fails with `NotFound`
    /// if the source item is missing; nothing is created at the destination
    /// in that case beyond the container itself.
    #[instrument(skip(self))]
    pub async fn move_item(&self, from: &str, to: &str, item: &str) -> DocResult<TransferReceipt> {
        if from == to {
            return Err(DocError::InvalidArgument(format!(
                "source and destination container are both {from:?}"
            )));
        }
        let created_container = self.backend().create_container_if_absent(to).await?;
        if created_container {
            debug!(container = to, "destination container created");
        }
        self.transfer(from, item, to, item, created_container).await
    }

    /// Rename `old` to `new` inside `container`, overwriting any item already
    /// named `new`.
    #[instrument(skip(self))]
    pub async fn rename_item(
        &self,
        container: &str,
        old: &str,
        new: &str,
    ) -> DocResult<TransferReceipt> {
        if old == new {
            return Err(DocError::InvalidArgument(format!(
                "cannot rename {old:?} onto itself"
            )));
        }
        self.transfer(container, old, container, new, false).await
    }

    async fn transfer(
        &self,
        from_container: &str,
        from_item: &str,
        to_container: &str,
        to_item: &str,
        created_container: bool,
    ) -> DocResult<TransferReceipt> {
        let backend = self.backend();
        backend
            .copy_item(from_container, from_item, to_container, to_item)
            .await?;

        match backend.delete_item_if_exists(from_container, from_item).await {
            Ok(true) => {}
            Ok(false) => {
                debug!(
                    container = from_container,
                    item = from_item,
                    "source already gone after copy"
                );
            }
            Err(e) => {
                warn!(
                    from = %format!("{from_container}/{from_item}"),
                    to = %format!("{to_container}/{to_item}"),
                    error = %e,
                    "copy committed but source delete failed"
                );
                return Err(DocError::TransferPartialFailure {
                    from_container: from_container.to_string(),
                    from_item: from_item.to_string(),
                    to_container: to_container.to_string(),
                    to_item: to_item.to_string(),
                    reason: e.to_string(),
                });
            }
        }

        info!(
            from = %format!("{from_container}/{from_item}"),
            to = %format!("{to_container}/{to_item}"),
            "item transferred"
        );
        Ok(TransferReceipt {
            from_container: from_container.to_string(),
            from_item: from_item.to_string(),
            to_container: to_container.to_string(),
            to_item: to_item.to_string(),
            created_container,
        })
    }
}
