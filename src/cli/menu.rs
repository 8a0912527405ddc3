//! Interactive numbered menu

use crate::application::{EntryQueryService, EntryRepository};
use crate::cli::output::{format_entry_list, format_recent_list, format_setup_report};
use crate::domain::entry::format_date;
use crate::domain::{DateReference, NewEntry};
use crate::error::Result;
use crate::infrastructure::{BlobStore, KeyValueStore, Provision};
use chrono::{NaiveDate, Utc};
use std::io::{BufRead, Write};

const MENU: &str = "\n\
Main menu\n\
1. Create entry\n\
2. List entries\n\
3. Search by date\n\
4. Search by tag\n\
5. Configure storage\n\
6. Exit\n";

/// Menu over any input/output pair, so it can be driven from tests
pub struct Menu<'a, K, B, R, W> {
    repository: &'a EntryRepository<K, B>,
    input: R,
    output: W,
    today: NaiveDate,
}

impl<'a, K, B, R, W> Menu<'a, K, B, R, W>
where
    K: KeyValueStore + Provision,
    B: BlobStore + Provision,
    R: BufRead,
    W: Write,
{
    pub fn new(repository: &'a EntryRepository<K, B>, input: R, output: W) -> Self {
        Menu {
            repository,
            input,
            output,
            today: Utc::now().date_naive(),
        }
    }

    /// Reference date for "today" and weekday lookups
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self
    }

    /// Loop until the user picks exit or input ends.
    ///
    /// Failures of a single action are reported and the loop continues;
    /// only terminal I/O errors end it early.
    pub fn run(&mut self) -> Result<()> {
        writeln!(self.output, "Bitacora")?;

        loop {
            write!(self.output, "{}", MENU)?;
            let Some(choice) = self.prompt("\nChoose an option: ")? else {
                break;
            };

            let outcome = match choice.trim() {
                "1" => self.create_entry(),
                "2" => self.list_entries(),
                "3" => self.search_by_date(),
                "4" => self.search_by_tag(),
                "5" => self.setup_storage(),
                "6" => break,
                _ => {
                    writeln!(self.output, "Invalid option, try again.")?;
                    Ok(())
                }
            };

            if let Err(e) = outcome {
                tracing::warn!(error = %e, "menu action failed");
                writeln!(self.output, "Error: {}", e)?;
            }
        }

        writeln!(self.output, "Bye!")?;
        Ok(())
    }

    fn create_entry(&mut self) -> Result<()> {
        let title = self.prompt("Title: ")?.unwrap_or_default();
        if title.trim().is_empty() {
            writeln!(self.output, "Title cannot be empty.")?;
            return Ok(());
        }

        writeln!(
            self.output,
            "Write your entry (two empty lines to finish):"
        )?;
        self.output.flush()?;
        let content = read_multiline(&mut self.input)?;

        let tags = self
            .prompt("Tags (comma separated, optional): ")?
            .unwrap_or_default();

        let entry = self
            .repository
            .create(NewEntry::new(title.trim(), content).with_tags(tags))?;
        writeln!(self.output, "Entry created: {} ({})", entry.id, entry.date)?;
        Ok(())
    }

    fn list_entries(&mut self) -> Result<()> {
        let entries = self.repository.get_all()?;
        write!(self.output, "{}", format_recent_list(&entries))?;
        writeln!(self.output)?;
        Ok(())
    }

    fn search_by_date(&mut self) -> Result<()> {
        let raw = self
            .prompt("Date (YYYY-MM-DD, today, yesterday): ")?
            .unwrap_or_default();
        let date = format_date(DateReference::parse(&raw)?.resolve(self.today));

        let entries = EntryQueryService::new(self.repository).by_date(&date)?;
        writeln!(self.output, "Entries for {}:", date)?;
        write!(self.output, "{}", format_entry_list(&entries))?;
        writeln!(self.output)?;
        Ok(())
    }

    fn search_by_tag(&mut self) -> Result<()> {
        let tag = self.prompt("Tag: ")?.unwrap_or_default();
        let tag = tag.trim();

        let entries = EntryQueryService::new(self.repository).by_tag(tag)?;
        writeln!(self.output, "Entries tagged '{}':", tag)?;
        write!(self.output, "{}", format_entry_list(&entries))?;
        writeln!(self.output)?;
        Ok(())
    }

    fn setup_storage(&mut self) -> Result<()> {
        let report = self.repository.setup_storage()?;
        write!(self.output, "{}", format_setup_report(&report))?;
        writeln!(self.output, "Storage ready.")?;
        Ok(())
    }

    /// Print `label` and read one line; `None` at end of input
    fn prompt(&mut self, label: &str) -> Result<Option<String>> {
        write!(self.output, "{}", label)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }
}

/// Read lines until two consecutive blank lines or end of input.
///
/// Single blank lines inside the text are kept; the result is trimmed.
pub fn read_multiline<R: BufRead>(input: &mut R) -> std::io::Result<String> {
    let mut content = String::new();
    let mut blank_run = 0;

    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            blank_run += 1;
            if blank_run >= 2 {
                break;
            }
            content.push('\n');
        } else {
            blank_run = 0;
            content.push_str(&line);
            content.push('\n');
        }
    }

    Ok(content.trim().to_string())
}
