use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use blobdoc_core::{DocumentStore, Lookup};
use blobdoc_store::{BlobStore, InMemoryBlobStore, LocalBlobStore};
use bytes::Bytes;
use colored::Colorize;
use serde::Serialize;
use serde_json::{json, Value};
use tokio::io::{AsyncReadExt, AsyncWriteExt};

use crate::cli::*;
use crate::config::{Backend, CliConfig};

pub async fn run_command(cli: Cli) -> anyhow::Result<()> {
    let config = CliConfig::load(cli.config.as_deref())?.with_root(cli.root.clone());
    let store = open_store(&config).await?;
    let out = Output(cli.format);

    match cli.command {
        Command::Containers => cmd_containers(&store, out).await,
        Command::CreateContainer(args) => {
            store.create_container(&args.container).await?;
            let text = format!("Created container {}", args.container.bold());
            out.done(text, json!({ "created": args.container }))
        }
        Command::DeleteContainer(args) => cmd_delete_container(&store, out, args).await,
        Command::Items(args) => cmd_items(&store, out, args).await,
        Command::Get(args) => cmd_get(&store, out, args).await,
        Command::Create(args) => cmd_create(&store, out, args).await,
        Command::Update(args) => cmd_update(&store, out, args).await,
        Command::Post(args) => cmd_post(&store, out, args).await,
        Command::Delete(args) => cmd_delete(&store, out, args).await,
        Command::Merge(args) => {
            let merged = store.container(&args.container).merge_all_raw().await?;
            out.value(&merged)
        }
        Command::Field(args) => cmd_field(&store, out, args).await,
        Command::Find(args) => cmd_find(&store, out, args).await,
        Command::Move(args) => {
            let receipt = store.move_item(&args.from, &args.to, &args.item).await?;
            let text = format!(
                "Moved {} {} {}/{}",
                args.item.yellow(),
                "→".dimmed(),
                receipt.to_container.bold(),
                receipt.to_item
            );
            out.done(text, &receipt)
        }
        Command::Rename(args) => {
            let receipt = store
                .rename_item(&args.container, &args.old, &args.new)
                .await?;
            let text = format!(
                "Renamed {} {} {}",
                args.old.yellow(),
                "→".dimmed(),
                args.new.yellow()
            );
            out.done(text, &receipt)
        }
        Command::Upload(args) => cmd_upload(&store, out, args).await,
        Command::Download(args) => cmd_download(&store, args).await,
    }
}

async fn open_store(config: &CliConfig) -> anyhow::Result<DocumentStore> {
    let backend: Arc<dyn BlobStore> = match config.storage.backend {
        Backend::Local => {
            let root = &config.storage.root;
            let local = LocalBlobStore::open(root)
                .await
                .with_context(|| format!("cannot open storage root {}", root.display()))?;
            Arc::new(local)
        }
        Backend::Memory => Arc::new(InMemoryBlobStore::new()),
    };
    Ok(DocumentStore::with_options(backend, config.documents.clone()))
}

/// Renders results as colored text or as JSON on stdout.
#[derive(Clone, Copy)]
struct Output(OutputFormat);

impl Output {
    fn done(self, text: String, value: impl Serialize) -> anyhow::Result<()> {
        match self.0 {
            OutputFormat::Text => println!("{} {}", "✓".green().bold(), text),
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&value)?),
        }
        Ok(())
    }

    fn lines(self, lines: &[String]) -> anyhow::Result<()> {
        match self.0 {
            OutputFormat::Text => {
                for line in lines {
                    println!("{line}");
                }
            }
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(lines)?),
        }
        Ok(())
    }

    fn value(self, value: &Value) -> anyhow::Result<()> {
        println!("{}", serde_json::to_string_pretty(value)?);
        Ok(())
    }
}

async fn cmd_containers(store: &DocumentStore, out: Output) -> anyhow::Result<()> {
    out.lines(&store.list_containers().await?)
}

async fn cmd_delete_container(
    store: &DocumentStore,
    out: Output,
    args: ContainerArgs,
) -> anyhow::Result<()> {
    let deleted = store.delete_container(&args.container).await?;
    let text = if deleted {
        format!("Deleted container {}", args.container.bold())
    } else {
        format!("No container named {}", args.container.bold())
    };
    out.done(text, json!({ "container": args.container, "deleted": deleted }))
}

async fn cmd_items(store: &DocumentStore, out: Output, args: ContainerArgs) -> anyhow::Result<()> {
    out.lines(&store.container(&args.container).sorted_names().await?)
}

async fn cmd_get(store: &DocumentStore, out: Output, args: ItemArgs) -> anyhow::Result<()> {
    let text = store.container(&args.container).read_text(&args.item).await?;
    match out.0 {
        OutputFormat::Text => println!("{text}"),
        OutputFormat::Json => {
            let value: Value = serde_json::from_str(&text)
                .with_context(|| format!("{} is not JSON", args.item))?;
            out.value(&value)?;
        }
    }
    Ok(())
}

async fn cmd_create(store: &DocumentStore, out: Output, args: CreateArgs) -> anyhow::Result<()> {
    let value = parse_payload(&read_payload(&args.payload).await?)?;
    let created = store.container(&args.container).create_value(value).await?;
    let id = created.get("Id").and_then(Value::as_str).unwrap_or_default();
    out.done(format!("Created {}", id.yellow()), &created)
}

async fn cmd_update(store: &DocumentStore, out: Output, args: UpdateArgs) -> anyhow::Result<()> {
    let value = parse_payload(&read_payload(&args.payload).await?)?;
    let updated = store
        .container(&args.container)
        .update_value(&args.id, value)
        .await?;
    out.done(format!("Updated {}", args.id.yellow()), &updated)
}

async fn cmd_post(store: &DocumentStore, out: Output, args: CreateArgs) -> anyhow::Result<()> {
    let payload = read_payload(&args.payload).await?;
    let receipt = store.container(&args.container).open_post(&payload).await?;
    out.done(
        format!("Posted {} (sequence {})", receipt.item.yellow(), receipt.sequence),
        &receipt,
    )
}

async fn cmd_delete(store: &DocumentStore, out: Output, args: ItemArgs) -> anyhow::Result<()> {
    let outcome = store.container(&args.container).delete(&args.item).await?;
    let text = if outcome.is_deleted() {
        format!("Deleted {}", args.item.yellow())
    } else {
        format!("Nothing to delete at {}", args.item.yellow())
    };
    out.done(text, outcome)
}

async fn cmd_field(store: &DocumentStore, out: Output, args: FieldArgs) -> anyhow::Result<()> {
    let lookup = store
        .container(&args.container)
        .search_field(&args.item, &args.field)
        .await?;
    match out.0 {
        OutputFormat::Text => match &lookup {
            Lookup::Found(value) => println!("{value}"),
            Lookup::ItemMissing => println!("{} no item {}", "✗".red(), args.item.yellow()),
            Lookup::FieldAbsent => println!(
                "{} {} has no field {}",
                "✗".red(),
                args.item.yellow(),
                args.field.bold()
            ),
        },
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&lookup)?),
    }
    Ok(())
}

async fn cmd_find(store: &DocumentStore, out: Output, args: FindArgs) -> anyhow::Result<()> {
    let found = store
        .container(&args.container)
        .search_by_field_value(&args.field, &args.value)
        .await?;
    match out.0 {
        OutputFormat::Text => match &found {
            Some(id) => println!("{id}"),
            None => println!(
                "{} no document with {} = {}",
                "✗".red(),
                args.field.bold(),
                args.value
            ),
        },
        OutputFormat::Json => {
            let value = json!({ "id": found });
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
    }
    Ok(())
}

async fn cmd_upload(store: &DocumentStore, out: Output, args: UploadArgs) -> anyhow::Result<()> {
    let data = tokio::fs::read(&args.path)
        .await
        .with_context(|| format!("cannot read {}", args.path.display()))?;
    let size = data.len();
    store
        .container(&args.container)
        .upload(&args.item, Bytes::from(data))
        .await?;
    out.done(
        format!("Uploaded {} ({size} bytes)", args.item.yellow()),
        json!({ "container": args.container, "item": args.item, "size": size }),
    )
}

async fn cmd_download(store: &DocumentStore, args: DownloadArgs) -> anyhow::Result<()> {
    let data = store.container(&args.container).download(&args.item).await?;
    match &args.output {
        Some(path) => write_file(path, &data).await?,
        None => {
            let mut stdout = tokio::io::stdout();
            stdout.write_all(&data).await?;
            stdout.flush().await?;
        }
    }
    Ok(())
}

async fn write_file(path: &Path, data: &[u8]) -> anyhow::Result<()> {
    tokio::fs::write(path, data)
        .await
        .with_context(|| format!("cannot write {}", path.display()))
}

/// Resolve a payload from its inline text, its file, or stdin.
async fn read_payload(args: &PayloadArgs) -> anyhow::Result<String> {
    if let Some(json) = &args.json {
        return Ok(json.clone());
    }
    if let Some(path) = &args.file {
        return tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("cannot read {}", path.display()));
    }
    let mut buf = String::new();
    tokio::io::stdin()
        .read_to_string(&mut buf)
        .await
        .context("cannot read payload from stdin")?;
    Ok(buf)
}

fn parse_payload(text: &str) -> anyhow::Result<Value> {
    serde_json::from_str(text).context("payload is not valid JSON")
}
