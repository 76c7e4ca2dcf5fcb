//! Chess console
//!
//! Play a game in one room from the terminal, against yourself or the
//! random player.

use chess_core::{Board, GamePhase, GameStatus, Player};
use random_player::RandomPlayer;
use rooms::{GameStore, MoveReport, RoomResult, RoomService, ServiceConfig};
use std::env;
use std::io::{self, BufRead, Write};
use std::path::Path;
use std::process;
use tracing_subscriber::EnvFilter;

fn print_usage() {
    println!("Chess console");
    println!();
    println!("Usage:");
    println!("  chess_console [config.toml] [--room CODE]");
    println!();
    println!("Without --room a new room with a random code is created.");
}

fn print_help() {
    println!("Commands:");
    println!("  start              - Start (or restart) the game");
    println!("  move <from> <to>   - Move a piece, e.g. move e2 e4");
    println!("  auto               - Let the random player move for the side to move");
    println!("  status             - Show the phase and both scores");
    println!("  board              - Print the board");
    println!("  end                - Stop the game; the side ahead on material wins");
    println!("  replay             - Rebuild the game from its move history");
    println!("  help               - Show this list");
    println!("  quit               - Leave the console");
}

struct Args {
    config: Option<String>,
    room: Option<String>,
}

fn parse_args(args: &[String]) -> Option<Args> {
    let mut parsed = Args {
        config: None,
        room: None,
    };
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--room" | "-r" => {
                parsed.room = Some(args.get(i + 1)?.clone());
                i += 1;
            }
            "--help" | "-h" => return None,
            path if parsed.config.is_none() => parsed.config = Some(path.to_string()),
            _ => return None,
        }
        i += 1;
    }
    Some(parsed)
}

fn print_status(status: &GameStatus) {
    println!("Phase: {}", status.phase);
    println!(
        "Score: White {:.1}, Black {:.1}",
        status.white_score, status.black_score
    );
}

fn print_report(report: &MoveReport) {
    match report.captured {
        Some(piece) => println!("{} {} takes {}", report.moved.symbol(), report.mv, piece.symbol()),
        None => println!("{} {}", report.moved.symbol(), report.mv),
    }
    if let GamePhase::Ended { .. } = report.phase {
        println!("Game over: {}", report.phase);
    }
}

fn print_board<S: GameStore>(service: &RoomService<S>, room: &str) -> RoomResult<()> {
    let board = Board::from_snapshot(&service.board(room)?)?;
    println!("{board}");
    Ok(())
}

/// Run one command line. Returns `false` when the console should exit.
fn run_command<S: GameStore>(
    service: &RoomService<S>,
    room: &str,
    player: &mut RandomPlayer,
    words: &[&str],
) -> RoomResult<bool> {
    match words {
        [] => {}
        ["quit"] | ["exit"] => return Ok(false),
        ["help"] => print_help(),
        ["start"] => {
            service.start(room)?;
            player.new_game();
            print_board(service, room)?;
        }
        ["move", from, to] => {
            let report = service.submit_move(room, from, to)?;
            print_report(&report);
            print_board(service, room)?;
        }
        ["auto"] => {
            let Some(side) = service.turn(room)? else {
                println!("No game is running; use 'start' first.");
                return Ok(true);
            };
            let board = Board::from_snapshot(&service.board(room)?)?;
            match player.choose_move(&board, side) {
                Some(mv) => {
                    let from = mv.from.to_notation();
                    let to = mv.to.to_notation();
                    let report = service.submit_move(room, &from, &to)?;
                    print!("{}: ", player.name());
                    print_report(&report);
                    print_board(service, room)?;
                }
                None => println!("{side} has no piece that can move."),
            }
        }
        ["status"] => print_status(&service.status(room)?),
        ["board"] => print_board(service, room)?,
        ["end"] => {
            let phase = service.end(room)?;
            println!("Game over: {phase}");
            print_status(&service.status(room)?);
        }
        ["replay"] => {
            let status = service.replay(room)?;
            println!("Replayed {} moves.", service.history(room)?.len());
            print_status(&status);
        }
        _ => {
            println!("Unknown command: {}", words.join(" "));
            print_help();
        }
    }
    Ok(true)
}

fn main() {
    let args: Vec<String> = env::args().skip(1).collect();
    let Some(args) = parse_args(&args) else {
        print_usage();
        return;
    };

    let config = match &args.config {
        Some(path) => match ServiceConfig::load(Path::new(path)) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error: failed to load config {}: {}", path, e);
                process::exit(1);
            }
        },
        None => ServiceConfig::default(),
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .with_writer(io::stderr)
        .init();

    let store = match config.open_store() {
        Ok(store) => store,
        Err(e) => {
            eprintln!("Error: failed to open store: {}", e);
            process::exit(1);
        }
    };
    let service = RoomService::new(store, config);

    let room = match args.room {
        Some(room) => service.open_room(&room).map(|()| room),
        None => service.create_room(),
    };
    let room = match room {
        Ok(room) => room,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    println!("=== Room {} ===", room);
    print_help();

    let mut player = RandomPlayer::new();
    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        print!("> ");
        let _ = io::stdout().flush();

        line.clear();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => {}
            Err(e) => {
                eprintln!("Error: failed to read input: {}", e);
                break;
            }
        }

        let words: Vec<&str> = line.split_whitespace().collect();
        match run_command(&service, &room, &mut player, &words) {
            Ok(true) => {}
            Ok(false) => break,
            Err(e) => eprintln!("Error: {}", e),
        }
    }
}
