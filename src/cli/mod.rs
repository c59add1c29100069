//! Command-line front end: argument parsing and command dispatch.

pub mod output;
pub mod report;

use std::{io::Write, path::PathBuf};

use chrono::Utc;
use rust_decimal::Decimal;
use split_config::Config;
use split_core::{BalanceStyle, CurrencyFormatter, SettlementService};
use split_domain::ParticipantKey;
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

use crate::{
    errors::SplitError,
    snapshot::{load_snapshot, save_snapshot},
    utils::build_info::BuildInfo,
};
use output::{OutputPreferences, Printer};

pub const USAGE: &str = "Usage: splitledger_cli <command>\n\
Commands:\n  \
balances <snapshot.json>\n  \
suggest <snapshot.json>\n  \
instructions <snapshot.json> [expense-id ...]\n  \
remaining <snapshot.json> <expense-id>\n  \
summary <snapshot.json> <participant-key>\n  \
settle <snapshot.json> <expense-id> <participant-key> <amount>\n  \
check <snapshot.json>\n  \
export <snapshot.json>\n  \
version";

#[derive(Debug, Error)]
pub enum CliError {
    #[error("{0}\n\n{usage}", usage = USAGE)]
    Usage(String),
    #[error(transparent)]
    Split(#[from] SplitError),
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::Split(SplitError::Io(err))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Balances {
        snapshot: PathBuf,
    },
    Suggest {
        snapshot: PathBuf,
    },
    Instructions {
        snapshot: PathBuf,
        expense_ids: Vec<Uuid>,
    },
    Remaining {
        snapshot: PathBuf,
        expense_id: Uuid,
    },
    Summary {
        snapshot: PathBuf,
        participant: ParticipantKey,
    },
    Settle {
        snapshot: PathBuf,
        expense_id: Uuid,
        from: ParticipantKey,
        amount: Decimal,
    },
    Check {
        snapshot: PathBuf,
    },
    Export {
        snapshot: PathBuf,
    },
    Version,
}

impl Command {
    /// Parses arguments without the program name.
    pub fn parse<I>(args: I) -> Result<Self, CliError>
    where
        I: IntoIterator<Item = String>,
    {
        let mut args = args.into_iter();
        let name = args
            .next()
            .ok_or_else(|| CliError::Usage("missing command".into()))?;
        if name == "version" {
            return Ok(Command::Version);
        }
        let snapshot = args
            .next()
            .map(PathBuf::from)
            .ok_or_else(|| CliError::Usage(format!("`{name}` needs a snapshot path")))?;

        let command = match name.as_str() {
            "balances" => Command::Balances { snapshot },
            "suggest" => Command::Suggest { snapshot },
            "check" => Command::Check { snapshot },
            "export" => Command::Export { snapshot },
            "instructions" => Command::Instructions {
                snapshot,
                expense_ids: args.by_ref().map(|raw| parse_uuid(&raw)).collect::<Result<_, _>>()?,
            },
            "remaining" => Command::Remaining {
                snapshot,
                expense_id: parse_uuid(&required(&mut args, "expense id")?)?,
            },
            "summary" => Command::Summary {
                snapshot,
                participant: parse_key(&required(&mut args, "participant key")?)?,
            },
            "settle" => Command::Settle {
                snapshot,
                expense_id: parse_uuid(&required(&mut args, "expense id")?)?,
                from: parse_key(&required(&mut args, "participant key")?)?,
                amount: parse_amount(&required(&mut args, "amount")?)?,
            },
            other => return Err(CliError::Usage(format!("unknown command `{other}`"))),
        };

        if let Some(extra) = args.next() {
            return Err(CliError::Usage(format!("unexpected argument `{extra}`")));
        }
        Ok(command)
    }
}

/// Runs one command against the given preferences, writing to `out`.
pub fn run(command: Command, config: &Config, colors: bool, out: &mut dyn Write) -> Result<(), CliError> {
    let style = balance_style(config);
    let prefs = OutputPreferences {
        colors: colors && config.colors_enabled(),
        screen_reader_mode: config.screen_reader_mode,
    };
    let mut printer = Printer::new(out, prefs);

    match command {
        Command::Version => printer.info(BuildInfo::current())?,
        Command::Balances { snapshot } => {
            report::balances(&mut printer, &load_snapshot(&snapshot)?, &style)?
        }
        Command::Suggest { snapshot } => {
            report::suggestions(&mut printer, &load_snapshot(&snapshot)?, &style)?
        }
        Command::Instructions {
            snapshot,
            expense_ids,
        } => report::instructions(&mut printer, &load_snapshot(&snapshot)?, &expense_ids, &style)?,
        Command::Remaining {
            snapshot,
            expense_id,
        } => report::remaining(&mut printer, &load_snapshot(&snapshot)?, expense_id, &style)?,
        Command::Summary {
            snapshot,
            participant,
        } => report::summary(&mut printer, &load_snapshot(&snapshot)?, &participant, &style)?,
        Command::Check { snapshot } => {
            report::warnings(&mut printer, &load_snapshot(&snapshot)?, &style)?
        }
        Command::Export { snapshot } => {
            report::export(&mut printer, &load_snapshot(&snapshot)?, &style)?
        }
        Command::Settle {
            snapshot: path,
            expense_id,
            from,
            amount,
        } => {
            let mut snapshot = load_snapshot(&path)?;
            let expense = snapshot
                .expense(expense_id)
                .ok_or_else(|| SplitError::InvalidRef(format!("expense {expense_id} not found")))?;
            let settlement = SettlementService::prepare_settlement(
                expense,
                &from,
                amount,
                style.scale(),
                &snapshot.settlements,
                Utc::now(),
            )
            .map_err(SplitError::from)?;
            let id = snapshot.add_settlement(settlement);
            save_snapshot(&snapshot, &path)?;
            info!(settlement = %id, expense = %expense_id, "settlement recorded");
            printer.success(format!(
                "Recorded settlement {id}: {} paid {}",
                report::label(&from),
                style.format_amount(amount)
            ))?;
        }
    }
    Ok(())
}

/// Builds the formatter style from stored preferences.
pub fn balance_style(config: &Config) -> BalanceStyle {
    BalanceStyle {
        currency: config.currency_code(),
        locale: config.locale_config(),
        display: config.currency_display,
        negative_style: config.negative_style,
        precision: config.default_currency_precision.map(u32::from),
    }
}

fn required(args: &mut impl Iterator<Item = String>, what: &str) -> Result<String, CliError> {
    args.next()
        .ok_or_else(|| CliError::Usage(format!("missing {what}")))
}

fn parse_uuid(raw: &str) -> Result<Uuid, CliError> {
    Uuid::parse_str(raw.trim()).map_err(|_| CliError::Usage(format!("`{raw}` is not an id")))
}

fn parse_key(raw: &str) -> Result<ParticipantKey, CliError> {
    raw.parse()
        .map_err(|err| CliError::Split(SplitError::InvalidKey(err)))
}

fn parse_amount(raw: &str) -> Result<Decimal, CliError> {
    raw.trim()
        .parse()
        .map_err(|_| CliError::Usage(format!("`{raw}` is not an amount")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn args(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|arg| arg.to_string()).collect()
    }

    #[test]
    fn parses_report_commands() {
        assert_eq!(
            Command::parse(args(&["balances", "group.json"])).unwrap(),
            Command::Balances {
                snapshot: PathBuf::from("group.json")
            }
        );
        assert_eq!(Command::parse(args(&["version"])).unwrap(), Command::Version);
        let id = Uuid::from_u128(7);
        assert_eq!(
            Command::parse(args(&["settle", "g.json", &id.to_string(), "guest:Kim", "12.50"]))
                .unwrap(),
            Command::Settle {
                snapshot: PathBuf::from("g.json"),
                expense_id: id,
                from: ParticipantKey::Guest("Kim".into()),
                amount: dec!(12.50),
            }
        );
    }

    #[test]
    fn rejects_malformed_arguments() {
        assert!(matches!(Command::parse(args(&[])), Err(CliError::Usage(_))));
        assert!(matches!(
            Command::parse(args(&["balances"])),
            Err(CliError::Usage(_))
        ));
        assert!(matches!(
            Command::parse(args(&["remaining", "g.json", "nope"])),
            Err(CliError::Usage(_))
        ));
        assert!(matches!(
            Command::parse(args(&["summary", "g.json", "guest:"])),
            Err(CliError::Split(SplitError::InvalidKey(_)))
        ));
        assert!(matches!(
            Command::parse(args(&["suggest", "g.json", "extra"])),
            Err(CliError::Usage(_))
        ));
        assert!(matches!(
            Command::parse(args(&["explode", "g.json"])),
            Err(CliError::Usage(_))
        ));
    }

    #[test]
    fn style_follows_config() {
        let config = Config {
            currency: "JPY".into(),
            default_currency_precision: Some(1),
            ..Config::default()
        };
        let style = balance_style(&config);
        assert_eq!(style.scale(), 1);
        assert_eq!(style.currency.as_str(), "JPY");
    }
}
