use std::io::{BufRead, Write};
use std::thread;
use std::time::Duration;

use duopuzzle_core::rng::seed_from_nonce;
use duopuzzle_core::{
    Gesture, PieceId, Point, PoolRect, PuzzleSettings, PuzzleSurface, Side, SolutionSink,
    SolutionStatus, Transition,
};
use tracing::info;

use crate::side_name;

/// Pool coordinates typed at the prompt are percentages.
const POOL: PoolRect = PoolRect {
    left: 0.0,
    top: 0.0,
    width: 100.0,
    height: 100.0,
};

const HELP: &str = "\
commands:
  show                 print board and pool
  drag <id> [dx dy]    pick up a piece, grabbing it dx,dy from its corner
  cell <id> <cell>     drop a piece on a board cell
  pool <id> <x> <y>    drop a piece on the pool at x,y percent
  flip <id>            turn a piece over
  hover <id>           bring a pool piece to the front
  reset                start over with a new puzzle
  quit";

struct Announcer {
    solved: Vec<Side>,
}

impl SolutionSink for Announcer {
    fn solution(&mut self, side: Side) {
        self.solved.push(side);
    }

    fn win_sound(&mut self, src: &str) {
        info!(src, "play: win sound");
    }
}

pub(crate) fn run<R: BufRead, W: Write>(
    settings: PuzzleSettings,
    seed: u32,
    input: R,
    mut out: W,
) -> Result<(), Box<dyn std::error::Error>> {
    let delay = Duration::from_millis(settings.delay_ms);
    let mut surface = PuzzleSurface::new(settings, seed, Announcer { solved: Vec::new() });
    let mut next_seed = seed;
    writeln!(out, "{HELP}")?;
    render(&surface, &mut out)?;

    for line in input.lines() {
        let line = line?;
        let words: Vec<&str> = line.split_whitespace().collect();
        let Some((&command, args)) = words.split_first() else {
            continue;
        };
        let transition = match command {
            "quit" | "exit" => break,
            "help" => {
                writeln!(out, "{HELP}")?;
                continue;
            }
            "show" => {
                render(&surface, &mut out)?;
                continue;
            }
            "reset" => {
                next_seed = seed_from_nonce(u64::from(next_seed) + 1);
                surface.reset(next_seed);
                render(&surface, &mut out)?;
                continue;
            }
            _ => match parse_gesture(command, args, &surface) {
                Ok(gesture) => surface.handle(gesture),
                Err(message) => {
                    writeln!(out, "? {message}")?;
                    continue;
                }
            },
        };
        writeln!(out, "{}", describe(&transition))?;

        if let SolutionStatus::Pending(side) = surface.status() {
            writeln!(out, "solved: every piece shows its {} side", side_name(side))?;
            thread::sleep(delay);
            surface.confirm_solution(true);
            writeln!(out, "type `reset` for a new puzzle")?;
        }
        if !transition.is_ignored() {
            render(&surface, &mut out)?;
        }
    }
    Ok(())
}

fn parse_gesture<S: SolutionSink>(
    command: &str,
    args: &[&str],
    surface: &PuzzleSurface<S>,
) -> Result<Gesture, String> {
    let piece = || -> Result<PieceId, String> {
        let raw = args.first().ok_or("missing piece id")?;
        PieceId::parse(raw).map_err(|err| err.to_string())
    };
    let number = |index: usize, what: &str| -> Result<f32, String> {
        args.get(index)
            .ok_or(format!("missing {what}"))?
            .parse::<f32>()
            .map_err(|_| format!("{what} must be a number"))
    };
    match command {
        "drag" => {
            let piece = piece()?;
            let (dx, dy) = if args.len() >= 3 {
                (number(1, "dx")?, number(2, "dy")?)
            } else {
                (0.0, 0.0)
            };
            let origin = surface
                .session()
                .piece(piece)
                .map(|entry| Point::new(entry.pool_x * POOL.width, entry.pool_y * POOL.height))
                .unwrap_or_default();
            Ok(Gesture::DragStart {
                piece,
                pointer: Point::new(origin.x + dx, origin.y + dy),
                piece_origin: origin,
            })
        }
        "cell" => {
            let piece = piece()?;
            let cell = args
                .get(1)
                .ok_or("missing cell")?
                .parse::<usize>()
                .map_err(|_| "cell must be a whole number".to_string())?;
            Ok(Gesture::DropOnCell { piece, cell })
        }
        "pool" => Ok(Gesture::DropOnPool {
            piece: piece()?,
            pointer: Point::new(number(1, "x")?, number(2, "y")?),
            pool: POOL,
        }),
        "flip" => Ok(Gesture::Click { piece: piece()? }),
        "hover" => Ok(Gesture::HoverEnter { piece: piece()? }),
        other => Err(format!("unknown command `{other}`, try `help`")),
    }
}

fn describe(transition: &Transition) -> String {
    match transition {
        Transition::Ignored(reason) => format!("ignored: {reason:?}"),
        Transition::DragStarted { piece } => format!("holding {piece}"),
        Transition::Placed {
            piece,
            cell,
            swapped,
            displaced,
            ..
        } => {
            let mut text = format!("{piece} -> cell {cell}");
            if let Some(other) = swapped {
                text.push_str(&format!(", swapped with {other}"));
            }
            if let Some(other) = displaced {
                text.push_str(&format!(", {other} back to pool"));
            }
            text
        }
        Transition::Pooled { piece, pool, .. } => {
            format!("{piece} -> pool {:.0}%,{:.0}%", pool.0 * 100.0, pool.1 * 100.0)
        }
        Transition::Flipped { piece, side } => format!("{piece} shows {}", side_name(*side)),
        Transition::Raised { piece, z_index } => format!("{piece} raised to {z_index}"),
        Transition::DragCancelled => "dropped nowhere".to_string(),
    }
}

fn face(side: Side) -> char {
    match side {
        Side::Front => 'F',
        Side::Back => 'B',
    }
}

fn render<S: SolutionSink, W: Write>(surface: &PuzzleSurface<S>, out: &mut W) -> std::io::Result<()> {
    let session = surface.session();
    let cols = session.cols().max(1);
    for (cell, slot) in session.grid().slots().iter().enumerate() {
        match slot.and_then(|id| session.piece(id)) {
            Some(piece) => write!(out, "[{:>3}{}]", piece.id, face(piece.current_side))?,
            None => write!(out, "[ {:>2} ]", cell)?,
        }
        if cell % cols == cols - 1 {
            writeln!(out)?;
        }
    }
    let pool: Vec<String> = session
        .pool_pieces()
        .iter()
        .map(|piece| {
            format!(
                "{}{}@{:.0},{:.0}",
                piece.id,
                face(piece.current_side),
                piece.pool_x * 100.0,
                piece.pool_y * 100.0
            )
        })
        .collect();
    writeln!(out, "pool: {}", pool.join(" "))?;
    if session.is_locked() {
        writeln!(out, "(locked)")?;
    }
    Ok(())
}
