use bitacora::api::{self, ApiRequest};
use bitacora::application::query_service::today;
use bitacora::application::{
    init::StorageSettings, manage_config::ConfigService, repository_for, EntryQueryService,
    FileRepository,
};
use bitacora::cli::output::{
    format_config, format_draft, format_entry, format_entry_list, format_recent_list,
    format_setup_report, format_stats, format_tag_list,
};
use bitacora::cli::{Cli, Commands, DraftAction, Menu};
use bitacora::domain::entry::format_date;
use bitacora::domain::{DateReference, Entry, EntryPatch, NewEntry, SearchCriteria, TagsInput};
use bitacora::error::{BitacoraError, Result};
use bitacora::infrastructure::store::{FileBucket, FileTable};
use bitacora::infrastructure::{Config, Draft, EditorSession, Workspace};
use clap::Parser;
use std::fs;
use std::io::Read;
use std::path::Path;

fn main() {
    // Logs go to stderr; stdout carries command output and API responses
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(_) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {}", e.display_with_suggestions());
            std::process::exit(e.exit_code());
        }
    }
}

/// Workspace, effective config and repository for commands that need entries
struct Session {
    workspace: Workspace,
    config: Config,
    repository: FileRepository,
}

impl Session {
    fn open(root: Option<&Path>) -> Result<Self> {
        let workspace = discover(root)?;
        let config = workspace.load_config()?.with_env_overrides();
        let repository = repository_for(&workspace, &config)?;
        Ok(Session {
            workspace,
            config,
            repository,
        })
    }

    fn queries(&self) -> EntryQueryService<'_, FileTable, FileBucket> {
        EntryQueryService::new(&self.repository)
    }

    fn editor(&self) -> EditorSession {
        EditorSession::new(self.config.get_editor())
    }
}

fn discover(root: Option<&Path>) -> Result<Workspace> {
    match root {
        Some(root) => Workspace::discover_from(root),
        None => Workspace::discover(),
    }
}

fn run(cli: Cli) -> Result<()> {
    let root = cli.root.as_deref();

    match cli.command {
        Some(Commands::Init {
            path,
            region,
            table,
            bucket,
        }) => {
            let settings = StorageSettings {
                region,
                table,
                bucket,
            };
            let report = bitacora::application::init(&path, &settings)?;

            if report.reinitialized {
                println!("Reinitialized bitacora workspace at {}", path.display());
            } else {
                println!("Initialized bitacora workspace at {}", path.display());
            }
            println!("Region: {}", report.config.region);
            print!("{}", format_setup_report(&report.storage));
            Ok(())
        }
        Some(Commands::New {
            title,
            content,
            tags,
            editor,
            from_draft,
        }) => {
            let session = Session::open(root)?;

            let draft = if from_draft {
                session.workspace.load_draft()?.ok_or_else(|| {
                    BitacoraError::Validation("No saved draft to start from".to_string())
                })?
            } else {
                Draft::default()
            };

            let title = title.unwrap_or(draft.title);
            let mut content = content.unwrap_or(draft.content);
            let tags = if tags.trim().is_empty() {
                draft.tags
            } else {
                tags
            };
            if editor {
                content = session.editor().compose(&content)?;
            }

            let entry = session
                .repository
                .create(NewEntry::new(title, content).with_tags(tags))?;
            if from_draft {
                session.workspace.clear_draft()?;
            }

            println!("Created {} ({})", entry.id, entry.date);
            Ok(())
        }
        Some(Commands::List { limit }) => {
            let session = Session::open(root)?;
            let mut entries = session.repository.get_all()?;
            if let Some(limit) = limit {
                entries.truncate(limit);
            }
            print_text(&format_recent_list(&entries));
            Ok(())
        }
        Some(Commands::Show { id }) => {
            let session = Session::open(root)?;
            print!("{}", format_entry(&session.repository.get_by_id(&id)?));
            Ok(())
        }
        Some(Commands::Edit {
            id,
            title,
            content,
            tags,
            editor,
        }) => {
            let session = Session::open(root)?;

            let mut patch = EntryPatch {
                title,
                content,
                tags: tags.map(|raw| {
                    if raw.trim().is_empty() {
                        TagsInput::List(Vec::new())
                    } else {
                        raw.into()
                    }
                }),
            };
            if editor {
                let initial = match &patch.content {
                    Some(content) => content.clone(),
                    None => session.repository.get_by_id(&id)?.content,
                };
                patch.content = Some(session.editor().compose(&initial)?);
            }
            if patch.is_empty() {
                return Err(BitacoraError::Validation(
                    "Nothing to change: pass --title, --content, --tags or --editor".to_string(),
                ));
            }

            let entry = session.repository.update(&id, patch)?;
            println!("Updated {}", entry.id);
            Ok(())
        }
        Some(Commands::Delete { id }) => {
            let session = Session::open(root)?;
            session.repository.delete(&id)?;
            println!("Deleted {}", id);
            Ok(())
        }
        Some(Commands::Date { date }) => {
            let session = Session::open(root)?;
            let date = format_date(DateReference::parse(&date)?.resolve(today()));
            print_entries(&session.queries().by_date(&date)?);
            Ok(())
        }
        Some(Commands::Tag { tag }) => {
            let session = Session::open(root)?;
            print_entries(&session.queries().by_tag(&tag)?);
            Ok(())
        }
        Some(Commands::Search { text, when, tag }) => {
            let session = Session::open(root)?;
            let criteria = SearchCriteria {
                text,
                bucket: when.as_deref().map(str::parse).transpose()?,
                tag,
            };
            print_entries(&session.queries().search(&criteria)?);
            Ok(())
        }
        Some(Commands::Tags) => {
            let session = Session::open(root)?;
            print_text(&format_tag_list(&session.queries().tags()?));
            Ok(())
        }
        Some(Commands::Stats) => {
            let session = Session::open(root)?;
            print!("{}", format_stats(&session.queries().stats()?));
            Ok(())
        }
        Some(Commands::Documents { prefix }) => {
            let session = Session::open(root)?;
            let paths = session.repository.documents(&prefix)?;
            if paths.is_empty() {
                println!("No documents found");
            }
            for path in paths {
                println!("{}", path);
            }
            Ok(())
        }
        Some(Commands::Draft { action }) => {
            let workspace = discover(root)?;
            match action {
                DraftAction::Save {
                    title,
                    content,
                    tags,
                } => {
                    workspace.save_draft(&Draft {
                        title,
                        content,
                        tags,
                    })?;
                    println!("Draft saved");
                }
                DraftAction::Show => match workspace.load_draft()? {
                    Some(draft) => print!("{}", format_draft(&draft)),
                    None => println!("No saved draft"),
                },
                DraftAction::Clear => {
                    if workspace.clear_draft()? {
                        println!("Draft cleared");
                    } else {
                        println!("No saved draft");
                    }
                }
            }
            Ok(())
        }
        Some(Commands::Export) => {
            let session = Session::open(root)?;
            let entries = session.repository.get_all()?;
            println!("{}", serde_json::to_string_pretty(&entries)?);
            Ok(())
        }
        Some(Commands::Import { file }) => {
            let session = Session::open(root)?;
            let contents = fs::read_to_string(&file)?;
            let entries: Vec<Entry> = serde_json::from_str(&contents)?;
            let count = session.repository.import(&entries)?;
            println!("Imported {} entries", count);
            Ok(())
        }
        Some(Commands::Config { key, value, list }) => {
            let service = ConfigService::new(discover(root)?);

            if list {
                print!("{}", format_config(&service.list()?));
                Ok(())
            } else if let Some(k) = key {
                if let Some(v) = value {
                    service.set(&k, &v)?;
                    println!("Set {} = {}", k, v);
                    Ok(())
                } else {
                    println!("{}", service.get(&k)?);
                    Ok(())
                }
            } else {
                println!("Usage: bitacora config [--list | <key> [<value>]]");
                println!("Valid keys: region, table, bucket, editor, created");
                Ok(())
            }
        }
        Some(Commands::Api) => {
            let session = Session::open(root)?;
            let mut raw = String::new();
            std::io::stdin().read_to_string(&mut raw)?;

            let request: ApiRequest = serde_json::from_str(&raw)?;
            let response = api::handle(&session.repository, &request);
            println!("{}", serde_json::to_string(&response)?);
            Ok(())
        }
        Some(Commands::Menu) | None => {
            let session = Session::open(root)?;
            let stdin = std::io::stdin();
            let stdout = std::io::stdout();
            Menu::new(&session.repository, stdin.lock(), stdout.lock()).run()
        }
    }
}

fn print_entries(entries: &[Entry]) {
    print_text(&format_entry_list(entries));
}

/// Print with exactly one trailing newline
fn print_text(text: &str) {
    println!("{}", text.trim_end_matches('\n'));
}
