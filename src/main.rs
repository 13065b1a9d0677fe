//! Quack Attack demo driver
//!
//! Headless stand-in for the host engine: spawns a scripted flock, feeds it
//! fixed-timestep ticks and scripted pointer input, and tallies the outcome.
//! Run with `RUST_LOG=info` to watch the session unfold.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use quack_attack::consts::SIM_DT;
use quack_attack::sim::{
    DisposalSink, Duck, DuckKind, EffectKind, EffectPlayer, HitTester, ScoreEvent, ScoreSink,
    Services,
};
use quack_attack::tuning::DuckTuning;

/// Pointer script: which duck id gets struck on which frame.
struct ScriptedPointer {
    frame: u64,
    shots: Vec<(u64, u32)>,
}

impl HitTester for ScriptedPointer {
    fn struck(&self, duck: &Duck) -> bool {
        self.shots
            .iter()
            .any(|&(frame, id)| frame == self.frame && id == duck.id)
    }
}

/// Running session totals
#[derive(Default)]
struct ScoreBoard {
    points: i64,
    time_penalty: f32,
    hits: u32,
    misses: u32,
}

impl ScoreSink for ScoreBoard {
    fn record(&mut self, event: ScoreEvent) {
        log::info!("score event: {:?}", event);
        match event {
            ScoreEvent::RewardHit { points } => {
                self.points += i64::from(points);
                self.hits += 1;
            }
            ScoreEvent::RewardMissed => self.misses += 1,
            ScoreEvent::DecoyHit { penalty_secs } => self.time_penalty += penalty_secs,
            ScoreEvent::DecoyExpired => {}
        }
    }
}

/// Logs effect requests instead of playing them
struct ConsoleEffects;

impl EffectPlayer for ConsoleEffects {
    fn play(&mut self, effect: EffectKind, at: Vec2) {
        log::info!("effect: {:?} at ({:.0}, {:.0})", effect, at.x, at.y);
    }
}

/// Collects ids of ducks that are done
#[derive(Default)]
struct Graveyard(Vec<u32>);

impl DisposalSink for Graveyard {
    fn dispose(&mut self, id: u32) {
        self.0.push(id);
    }
}

fn main() {
    env_logger::init();

    let tuning = match std::env::var("QUACK_TUNING") {
        Ok(json) => DuckTuning::from_json(&json).unwrap_or_else(|e| {
            log::warn!("bad QUACK_TUNING, using defaults: {}", e);
            DuckTuning::default()
        }),
        Err(_) => DuckTuning::default(),
    };
    let mut rng = Pcg32::seed_from_u64(12345);

    // Three rewards and a decoy, staggered around the pond
    let mut ducks = vec![
        Duck::new(1, DuckKind::Reward, Vec2::new(-120.0, 40.0), &tuning),
        Duck::new(2, DuckKind::Reward, Vec2::new(0.0, 80.0), &tuning),
        Duck::new(3, DuckKind::Decoy, Vec2::new(90.0, 30.0), &tuning),
        Duck::new(4, DuckKind::Reward, Vec2::new(150.0, 60.0), &tuning),
    ];
    ducks[0].activate(None, None, &mut rng);
    ducks[1].activate(Some(2.0), Some(10), &mut rng);
    ducks[2].activate(Some(4.0), None, &mut rng);
    ducks[3].activate(None, None, &mut rng);

    // The player nails duck 1 early and clicks the decoy by mistake;
    // everything else runs out on its own
    let mut pointer = ScriptedPointer {
        frame: 0,
        shots: vec![(30, 1), (90, 3)],
    };

    let mut board = ScoreBoard::default();
    let mut effects = ConsoleEffects;
    let mut graveyard = Graveyard::default();

    let mut frame: u64 = 0;
    while graveyard.0.len() < ducks.len() && frame < 10_000 {
        pointer.frame = frame;

        // Legacy touch path: pushes a hit instead of being polled
        if frame == 150 {
            let mut services = Services {
                score: Some(&mut board),
                effects: Some(&mut effects),
                disposal: Some(&mut graveyard),
                ..Services::none()
            };
            if let Some(duck) = ducks.iter_mut().find(|d| d.id == 4) {
                duck.notify_struck(&mut services);
            }
        }

        for duck in &mut ducks {
            let mut services = Services {
                hits: Some(&pointer),
                score: Some(&mut board),
                effects: Some(&mut effects),
                disposal: Some(&mut graveyard),
            };
            duck.tick(SIM_DT, &mut services);
        }
        frame += 1;
    }

    log::info!(
        "session over after {} frames: {} pts, {} hit / {} missed, {:.1}s penalty",
        frame,
        board.points,
        board.hits,
        board.misses,
        board.time_penalty
    );
}
