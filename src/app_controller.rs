use log::{debug, info, warn};
use std::io::{BufRead, Write};
use std::sync::Arc;

use crate::app_config::{Config, SessionConfig};
use crate::combiner::Combiner;
use crate::database::{ArgumentsRecord, Repository};
use crate::errors::{AppError, StorageError, ValidationError};
use crate::session::{ArgumentPair, MenuAction};

// @module: Interactive session controller

const SEPARATOR_CHARACTER: char = '-';

/// Main application controller for the interactive menu loop
///
/// Owns the transient session state (current pair, exit flag); the
/// repository is injected and disposed by whoever created it.
pub struct Controller {
    // @field: Injected record store
    repository: Arc<dyn Repository<ArgumentsRecord>>,
    // @field: Combination policy for the add action
    combiner: Combiner,
    // @field: Session settings
    settings: SessionConfig,
    // @field: Last successfully set pair
    current: Option<ArgumentPair>,
    // @field: Set by the quit action
    requested_exit: bool,
}

impl Controller {
    pub fn new(
        repository: Arc<dyn Repository<ArgumentsRecord>>,
        combiner: Combiner,
        settings: SessionConfig,
    ) -> Self {
        Self {
            repository,
            combiner,
            settings,
            current: None,
            requested_exit: false,
        }
    }

    // @method: Create a controller with settings from the given configuration
    pub fn with_config(repository: Arc<dyn Repository<ArgumentsRecord>>, config: &Config) -> Self {
        Self::new(
            repository,
            Combiner::new(config.combine_policy),
            config.session.clone(),
        )
    }

    /// Currently set argument pair, if any
    pub fn current_arguments(&self) -> Option<&ArgumentPair> {
        self.current.as_ref()
    }

    /// Whether the quit action has been chosen
    pub fn requested_exit(&self) -> bool {
        self.requested_exit
    }

    /// Run the menu loop until quit or end of input
    pub async fn run<I, O>(&mut self, input: &mut I, output: &mut O) -> Result<(), AppError>
    where
        I: BufRead,
        O: Write,
    {
        info!("Interactive session started");
        writeln!(output, "Welcome to argstash.\n")?;

        while !self.requested_exit {
            self.print_arguments(output)?;
            self.print_menu(output)?;

            let action = match read_line(input)? {
                Some(bytes) => {
                    MenuAction::from_input(&String::from_utf8_lossy(&bytes), self.current.is_some())
                }
                None => {
                    debug!("End of input, leaving session");
                    MenuAction::Quit
                }
            };

            self.execute_action(action, input, output).await?;
            self.print_separator(output)?;
        }

        info!("Interactive session finished");
        Ok(())
    }

    /// Perform one menu action
    pub async fn execute_action<I, O>(
        &mut self,
        action: MenuAction,
        input: &mut I,
        output: &mut O,
    ) -> Result<(), AppError>
    where
        I: BufRead,
        O: Write,
    {
        match action {
            MenuAction::SetArguments => {
                writeln!(output, "Enter two arguments separated by a whitespace character:")?;
                output.flush()?;

                let bytes = read_line(input)?.unwrap_or_default();
                let outcome = match String::from_utf8(bytes) {
                    Ok(line) => self.set_arguments(&line).await,
                    Err(_) => Err(ValidationError::InvalidEncoding.into()),
                };
                match outcome {
                    Ok(record) => debug!("Arguments stored as record {}", record.id),
                    Err(AppError::Validation(e)) => {
                        writeln!(output, "\nInvalid input: {}.", e)?;
                    }
                    Err(AppError::Storage(e)) => {
                        warn!("Failed to store arguments: {}", e);
                        writeln!(output, "\nStorage error: {}", e)?;
                    }
                    Err(e) => return Err(e),
                }
            }
            MenuAction::ListRecords => match self.history().await {
                Ok(records) => self.print_records(&records, output)?,
                Err(e) => {
                    warn!("Failed to list records: {}", e);
                    writeln!(output, "\nStorage error: {}", e)?;
                }
            },
            MenuAction::AddArguments => match self.add_result() {
                Some(result) => writeln!(output, "\nResult: {}", result)?,
                None => writeln!(output, "\nWrong input. Try again")?,
            },
            MenuAction::Quit => {
                self.requested_exit = true;
                writeln!(output, "\nGoodbye!")?;
            }
            MenuAction::Invalid => {
                writeln!(output, "\nWrong input. Try again")?;
            }
        }

        Ok(())
    }

    /// Validate `line`, make it the current pair and persist it
    ///
    /// On validation failure nothing changes. When only the insert fails
    /// the pair stays current so the add action still works.
    pub async fn set_arguments(&mut self, line: &str) -> Result<ArgumentsRecord, AppError> {
        let pair = ArgumentPair::parse(line, self.settings.max_argument_length)?;
        let draft = pair.to_new_arguments();
        self.current = Some(pair);

        let record = self.repository.insert(draft).await?;
        info!("Stored arguments record {}", record.id);
        Ok(record)
    }

    /// All stored records, oldest first
    pub async fn history(&self) -> Result<Vec<ArgumentsRecord>, StorageError> {
        self.repository.get_all().await
    }

    /// Combination of the current pair, if one is set
    pub fn add_result(&self) -> Option<String> {
        self.current
            .as_ref()
            .map(|pair| self.combiner.combine(pair.first(), pair.second()))
    }

    fn print_arguments<O: Write>(&self, output: &mut O) -> Result<(), AppError> {
        if let Some(pair) = &self.current {
            writeln!(
                output,
                "Current arguments: 1) '{}' 2) '{}'",
                pair.first(),
                pair.second()
            )?;
        }
        Ok(())
    }

    fn print_menu<O: Write>(&self, output: &mut O) -> Result<(), AppError> {
        for line in MenuAction::menu_lines(self.current.is_some()) {
            writeln!(output, "{}", line)?;
        }
        output.flush()?;
        Ok(())
    }

    fn print_records<O: Write>(
        &self,
        records: &[ArgumentsRecord],
        output: &mut O,
    ) -> Result<(), AppError> {
        writeln!(output)?;
        if records.is_empty() {
            writeln!(output, "No records stored yet.")?;
        }
        for record in records {
            writeln!(output, "{}", record)?;
        }
        Ok(())
    }

    fn print_separator<O: Write>(&self, output: &mut O) -> Result<(), AppError> {
        let line: String = std::iter::repeat(SEPARATOR_CHARACTER)
            .take(self.settings.separator_width)
            .collect();
        writeln!(output, "\n{}\n", line)?;
        output.flush()?;
        Ok(())
    }
}

/// Read one raw line; `None` at end of input
///
/// Bytes are returned undecoded so malformed text is rejected per action
/// instead of ending the session.
fn read_line<I: BufRead>(input: &mut I) -> Result<Option<Vec<u8>>, AppError> {
    let mut line = Vec::new();
    let read = input.read_until(b'\n', &mut line)?;
    if read == 0 {
        return Ok(None);
    }
    Ok(Some(line))
}
