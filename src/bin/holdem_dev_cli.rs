// src/bin/holdem_dev_cli.rs
//
// Dev-CLI: бот-селфплей на одном столе.
//
//   holdem_dev_cli [CONFIG] [HANDS]
//   holdem_dev_cli --help
//
// Логи движка и ходы ботов – через RUST_LOG (например, RUST_LOG=debug).

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;

use holdem_table::agents::{self, WeightedRandomAgent};
use holdem_table::api::{ApiError, TableViewDto};
use holdem_table::domain::{SeatIndex, TableConfig};
use holdem_table::infra::SystemRng;
use holdem_table::HandEngine;

/// Защита от бесконечной раздачи, если что-то пошло не так.
const MAX_ACTIONS_PER_HAND: usize = 500;

/// Бот-селфплей Texas Hold'em на одном столе.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// JSON-конфиг стола; без него – стол по умолчанию.
    config: Option<PathBuf>,

    /// Сколько раздач сыграть.
    #[arg(default_value_t = 5)]
    hands: usize,
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => match load_config(path) {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!("[CLI] Не удалось загрузить конфиг {}: {e}", path.display());
                return ExitCode::FAILURE;
            }
        },
        None => TableConfig::default(),
    };

    let mut engine = match HandEngine::new(config, SystemRng) {
        Ok(engine) => engine,
        Err(e) => {
            eprintln!("[CLI] Некорректный конфиг: {e}");
            return ExitCode::FAILURE;
        }
    };

    let mut bots: Vec<WeightedRandomAgent<SystemRng>> = (0..engine.table.seat_count())
        .map(|_| WeightedRandomAgent::new(SystemRng))
        .collect();

    println!("================ {} =================", engine.table.config.name);

    for n in 1..=args.hands {
        println!();
        println!("================ HAND {n} =================");
        match agents::play_hand(&mut engine, &mut bots, MAX_ACTIONS_PER_HAND) {
            Ok((table, result)) => {
                print_table(&table);
                println!(
                    "[CLI] {} забирает банк {} ({})",
                    seat_name(&table, result.winner_seat),
                    result.total_pot,
                    if result.went_to_showdown {
                        "шоудаун"
                    } else {
                        "остальные сфолдили"
                    }
                );
            }
            Err(ApiError::HandAborted(msg)) => {
                println!("[CLI] Раздача снята, взносы возвращены: {msg}");
            }
            Err(e) => {
                println!("[CLI] ОШИБКА: {e}");
                break;
            }
        }
    }

    println!();
    println!("[CLI] Итоговые стеки:");
    for p in &engine.table.seats {
        println!("  {:<8} {}", p.name, p.stack);
    }
    ExitCode::SUCCESS
}

fn load_config(path: &Path) -> Result<TableConfig, Box<dyn std::error::Error>> {
    let raw = fs::read_to_string(path)?;
    Ok(TableConfig::from_json_str(&raw)?)
}

fn seat_name(view: &TableViewDto, seat: SeatIndex) -> String {
    view.players
        .get(seat as usize)
        .map(|p| p.display_name.clone())
        .unwrap_or_else(|| format!("seat {seat}"))
}

fn print_table(view: &TableViewDto) {
    let board: Vec<String> = view.board.iter().map(|c| c.to_string()).collect();
    println!(
        "[TABLE] street={} pot={} table_bet={} board=[{}]",
        view.street,
        view.pot,
        view.table_bet,
        board.join(" ")
    );
    for p in &view.players {
        let cards = p
            .hole_cards
            .as_ref()
            .map(|cs| cs.iter().map(|c| c.to_string()).collect::<Vec<_>>().join(" "))
            .unwrap_or_else(|| "?? ??".to_string());
        println!(
            "  seat {} {:<8} stack={:<6} bet={:<5} {:?} [{}]",
            p.seat_index, p.display_name, p.stack, p.current_bet, p.status, cards
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hands_defaults_to_five() {
        let args = Args::try_parse_from(["holdem_dev_cli"]).unwrap();
        assert!(args.config.is_none());
        assert_eq!(args.hands, 5);

        let args = Args::try_parse_from(["holdem_dev_cli", "table.json"]).unwrap();
        assert_eq!(args.config, Some(PathBuf::from("table.json")));
        assert_eq!(args.hands, 5);
    }

    #[test]
    fn bad_hand_count_is_an_error() {
        assert!(Args::try_parse_from(["holdem_dev_cli", "table.json", "abc"]).is_err());
        assert!(Args::try_parse_from(["holdem_dev_cli", "table.json", "-3"]).is_err());
    }

    #[test]
    fn explicit_hand_count_is_used() {
        let args = Args::try_parse_from(["holdem_dev_cli", "table.json", "12"]).unwrap();
        assert_eq!(args.hands, 12);
    }
}
