use std::error::Error;
use std::io::{self, BufRead, Write};

use clap::Parser;
use strum::IntoEnumIterator;
use tracing_subscriber::EnvFilter;

use ttt_variants::game::cube::CubeIndex;
use ttt_variants::game::ultimate::UltimateMove;
use ttt_variants::game::wild::WildMove;
use ttt_variants::game::{FinishedState, Game, GameState, GridIndex, Mark};
use ttt_variants::session::{AnySession, Snapshot, VariantKind};

#[derive(Debug, Parser)]
#[command(name = "ttt", about = "A collection of tic-tac-toe variants")]
struct Args {
    /// Variant to start with (classic, ultimate, 3d, misere, wild, gomoku)
    #[arg(long)]
    variant: Option<VariantKind>,

    /// Print a JSON snapshot after every accepted move
    #[arg(long)]
    json: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();
    let args = Args::parse();

    let stdin = io::stdin();
    let mut input = stdin.lock().lines();
    let mut next_variant = args.variant;

    loop {
        let Some(kind) = next_variant.take().or_else(|| pick_variant(&mut input)) else {
            return Ok(());
        };
        let mut session = kind.start();
        if !run_game(&mut session, &mut input, args.json)? {
            return Ok(());
        }
    }
}

/// Shows the menu until the user picks a variant or quits.
fn pick_variant(input: &mut impl Iterator<Item = io::Result<String>>) -> Option<VariantKind> {
    let variants: Vec<VariantKind> = VariantKind::iter().collect();
    println!("\nSelect a game variant:");
    for (number, kind) in variants.iter().enumerate() {
        println!("  {}. {} ({})", number + 1, kind.title(), kind);
    }
    loop {
        print!("variant (number or id, q to quit)> ");
        let line = prompt(input)?;
        let choice = line.trim();
        if choice.eq_ignore_ascii_case("q") {
            return None;
        }
        if let Ok(number) = choice.parse::<usize>() {
            if let Some(kind) = number.checked_sub(1).and_then(|n| variants.get(n)) {
                return Some(*kind);
            }
        }
        if let Ok(kind) = choice.parse::<VariantKind>() {
            return Some(kind);
        }
        println!("unknown variant: {}", choice);
    }
}

/// Plays one session until the user leaves. Returns `false` to quit the
/// program, `true` to go back to the menu.
fn run_game(
    session: &mut AnySession,
    input: &mut impl Iterator<Item = io::Result<String>>,
    json: bool,
) -> Result<bool, Box<dyn Error>> {
    let kind = session.kind();
    println!("\n=== {} ===", kind.title());
    println!("{}", move_hint(kind));
    println!("(r = restart, m = menu, ? = rules, q = quit)");
    render(session);

    loop {
        print!("{}> ", turn_banner(session));
        let Some(line) = prompt(input) else {
            return Ok(false);
        };
        let trimmed = line.trim();
        match trimmed {
            "" => continue,
            "q" => return Ok(false),
            "m" => return Ok(true),
            "?" => {
                println!("{}", kind.rules());
                continue;
            }
            "r" => {
                session.reset();
                render(session);
                continue;
            }
            _ => {}
        }

        // illegal or unparsable moves change nothing; the board is simply
        // shown again as-is
        let accepted = dispatch(session, trimmed);
        if let Some(snapshot) = &accepted {
            if json {
                println!("{}", serde_json::to_string(snapshot)?);
            }
        }
        render(session);
        if let GameState::Finished(result) = session.state() {
            announce(session, result);
        }
    }
}

/// Parses the line in the variant's own move format and applies it.
fn dispatch(
    session: &mut AnySession,
    line: &str,
) -> Option<Snapshot<ttt_variants::game::BoardCell<Mark>>> {
    match session {
        AnySession::Classic(game) => {
            let [cell] = parse_numbers(line)?[..] else {
                return None;
            };
            game.play(GridIndex::from_flat(cell, 3))
        }
        AnySession::Misere(game) => {
            let [cell] = parse_numbers(line)?[..] else {
                return None;
            };
            game.play(GridIndex::from_flat(cell, 3))
        }
        AnySession::Wild(game) => {
            // "cell mark", e.g. "4 x"
            let mut words = line.split_whitespace();
            let cell = words.next()?.parse::<usize>().ok()?;
            let mark = match words.next()? {
                "x" | "X" => Mark::X,
                "o" | "O" => Mark::O,
                _ => return None,
            };
            if words.next().is_some() {
                return None;
            }
            game.play(WildMove::new(GridIndex::from_flat(cell, 3), mark))
        }
        AnySession::Ultimate(game) => {
            let [board, cell] = parse_numbers(line)?[..] else {
                return None;
            };
            game.play(UltimateMove::new(
                GridIndex::from_flat(board, 3),
                GridIndex::from_flat(cell, 3),
            ))
        }
        AnySession::Gomoku(game) => {
            let [row, col] = parse_numbers(line)?[..] else {
                return None;
            };
            game.play(GridIndex::new(row, col))
        }
        AnySession::Cube(game) => {
            let [layer, row, col] = parse_numbers(line)?[..] else {
                return None;
            };
            game.play(CubeIndex::new(layer, row, col))
        }
    }
}

fn parse_numbers(line: &str) -> Option<Vec<usize>> {
    line.split_whitespace()
        .map(|word| word.parse::<usize>())
        .collect::<Result<_, _>>()
        .ok()
}

fn move_hint(kind: VariantKind) -> &'static str {
    match kind {
        VariantKind::Classic | VariantKind::Misere => "moves: cell 0-8, row-major",
        VariantKind::Wild => "moves: cell 0-8 and a mark, e.g. \"4 x\"",
        VariantKind::Ultimate => "moves: board 0-8 and cell 0-8, e.g. \"0 4\"",
        VariantKind::Gomoku => "moves: row 0-14 and column 0-14",
        VariantKind::Cube => "moves: layer, row, column, each 0-2",
    }
}

fn turn_banner(session: &AnySession) -> String {
    match session.state() {
        GameState::Turn(player) => match session.kind() {
            VariantKind::Wild => format!("player {}", player + 1),
            _ => {
                let mark = if player == 0 { Mark::X } else { Mark::O };
                format!("player {} ({})", player + 1, mark)
            }
        },
        GameState::Finished(_) => "game over".to_string(),
    }
}

fn render(session: &AnySession) {
    match session {
        AnySession::Classic(game) => print!("{}", game.game().board()),
        AnySession::Misere(game) => print!("{}", game.game().board()),
        AnySession::Wild(game) => print!("{}", game.game().board()),
        AnySession::Gomoku(game) => print!("{}", game.game().board()),
        AnySession::Cube(game) => {
            for index in 0..3 {
                if let Some(layer) = game.game().board().layer(index) {
                    println!("layer {}:", index);
                    print!("{}", layer);
                }
            }
        }
        AnySession::Ultimate(game) => render_ultimate(game.snapshot(), game.game()),
    }
}

fn render_ultimate(
    snapshot: Snapshot<ttt_variants::game::BoardCell<Mark>>,
    game: &ttt_variants::game::ultimate::Ultimate,
) {
    for (row_number, row) in snapshot.board.iter().enumerate() {
        if row_number > 0 && row_number % 3 == 0 {
            println!("---------+---------+---------");
        }
        for (col_number, cell) in row.iter().enumerate() {
            if col_number > 0 && col_number % 3 == 0 {
                print!("|");
            }
            print!("{}", cell);
        }
        println!();
    }
    match game.active_board() {
        Some(board) => println!("active board: {}", board.row() * 3 + board.col()),
        None => println!("active board: any open board"),
    }
    print!("claimed boards:\n{}", game.meta());
}

fn announce(session: &AnySession, result: FinishedState) {
    match result {
        FinishedState::Draw => println!("It's a draw!"),
        FinishedState::Win(player) => match session {
            AnySession::Misere(game) => {
                let loser = game
                    .game()
                    .loser()
                    .map(|mark| mark.to_string())
                    .unwrap_or_default();
                println!("Loser: player {} ({})", 2 - player, loser);
            }
            _ => println!("Winner: player {}", player + 1),
        },
    }
}

fn prompt(input: &mut impl Iterator<Item = io::Result<String>>) -> Option<String> {
    if io::stdout().flush().is_err() {
        return None;
    }
    input.next()?.ok()
}
