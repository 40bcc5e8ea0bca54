use duopuzzle_core::{
    Gesture, PieceId, Point, PuzzleSettings, PuzzleSurface, Side, SolutionSink, SolutionStatus,
    Transition,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

/// Virtual pool size used to turn fractional pool positions into pointers.
const POOL_WIDTH_PX: f32 = 400.0;
const POOL_HEIGHT_PX: f32 = 600.0;
const GRAB_PX: f32 = 12.0;

#[derive(Clone, Copy, Debug)]
pub(crate) struct BotConfig {
    pub seed: u32,
    pub side: Side,
    pub miss_rate: f32,
}

#[derive(Debug, PartialEq, Eq)]
pub(crate) struct BotReport {
    pub side: Side,
    pub steps: usize,
    pub misses: usize,
}

#[derive(Default)]
struct Verdicts {
    solved: Option<Side>,
}

impl SolutionSink for Verdicts {
    fn solution(&mut self, side: Side) {
        self.solved = Some(side);
    }

    fn win_sound(&mut self, src: &str) {
        info!(src, "bot: win sound");
    }
}

struct Bot {
    surface: PuzzleSurface<Verdicts>,
    rng: StdRng,
    steps: usize,
    misses: usize,
}

impl Bot {
    fn gesture(&mut self, gesture: Gesture) -> Transition {
        let transition = self.surface.handle(gesture);
        if !transition.is_ignored() {
            self.steps += 1;
        }
        transition
    }

    fn carry_to(&mut self, piece: PieceId, cell: usize) -> Transition {
        let origin = self
            .surface
            .session()
            .piece(piece)
            .map(|entry| Point::new(entry.pool_x * POOL_WIDTH_PX, entry.pool_y * POOL_HEIGHT_PX))
            .unwrap_or_default();
        let pointer = Point::new(origin.x + GRAB_PX, origin.y + GRAB_PX);
        self.gesture(Gesture::HoverEnter { piece });
        self.gesture(Gesture::DragStart {
            piece,
            pointer,
            piece_origin: origin,
        });
        self.gesture(Gesture::DropOnCell { piece, cell })
    }

    fn unsolved_cells(&self) -> Vec<usize> {
        let grid = self.surface.session().grid();
        (0..grid.len())
            .filter(|cell| grid.get(*cell) != Some(PieceId(*cell as u32)))
            .collect()
    }
}

/// Solves a fresh puzzle through the same gestures a player issues: flip
/// every piece to the wanted face, then carry each piece to its cell,
/// occasionally missing so swaps and displacements get exercised.
pub(crate) fn solve(
    settings: PuzzleSettings,
    config: BotConfig,
) -> Result<BotReport, Box<dyn std::error::Error>> {
    if !(0.0..1.0).contains(&config.miss_rate) {
        return Err(format!("miss rate {} must be in [0, 1)", config.miss_rate).into());
    }
    let mut bot = Bot {
        surface: PuzzleSurface::new(settings, config.seed, Verdicts::default()),
        rng: StdRng::seed_from_u64(u64::from(config.seed)),
        steps: 0,
        misses: 0,
    };

    let total = bot.surface.session().pieces().len();
    for index in 0..total {
        let piece = PieceId(index as u32);
        let side = bot.surface.session().piece(piece).map(|entry| entry.current_side);
        if side != Some(config.side) {
            bot.gesture(Gesture::Click { piece });
        }
    }

    // correct drops never disturb finished cells, so this settles within
    // one correct drop per cell
    loop {
        let unsolved = bot.unsolved_cells();
        let Some(&cell) = unsolved.first() else {
            break;
        };
        let piece = PieceId(cell as u32);
        if unsolved.len() > 1 && bot.rng.random::<f32>() < config.miss_rate {
            let wrong = unsolved[bot.rng.random_range(1..unsolved.len())];
            debug!(piece = piece.0, cell = wrong, "bot: miss");
            bot.misses += 1;
            bot.carry_to(piece, wrong);
            continue;
        }
        bot.carry_to(piece, cell);
    }

    let side = match bot.surface.status() {
        SolutionStatus::Pending(side) => side,
        status => return Err(format!("board complete but status is {status:?}").into()),
    };
    if bot.surface.sink().solved != Some(side) {
        return Err("solution was not reported".into());
    }
    bot.surface.confirm_solution(true);
    info!(steps = bot.steps, misses = bot.misses, "bot: solved");
    Ok(BotReport {
        side,
        steps: bot.steps,
        misses: bot.misses,
    })
}
