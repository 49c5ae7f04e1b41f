//! Formation Strike headless runner
//!
//! Plays the simulation with an autopilot and logs what happens.
//! Usage: `formation-strike [tuning.json] [seconds]`

mod headless {
    use std::path::Path;

    use formation_strike::consts::*;
    use formation_strike::sim::{Battle, BattlePhase, EnemyState, Entity, GameEvent};
    use formation_strike::{Action, FrameInput, Tuning};

    /// Render-rate frame time the runner pretends to see
    const FRAME_DT: f32 = 1.0 / 50.0;

    struct Runner {
        battle: Battle,
        input: FrameInput,
        accumulator: f32,
        kills: u32,
    }

    impl Runner {
        fn new(seed: u64, tuning: Tuning) -> Self {
            Self {
                battle: Battle::new(seed, tuning),
                input: FrameInput::new(),
                accumulator: 0.0,
                kills: 0,
            }
        }

        /// Run fixed ticks for one rendered frame
        fn frame(&mut self, dt: f32) {
            let dt = dt.min(0.1);
            self.accumulator += dt;

            self.autopilot();

            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                self.battle.tick(SIM_DT, &self.input);
                self.accumulator -= SIM_DT;
                substeps += 1;
                self.input.end_frame();
            }

            for event in self.battle.drain_events() {
                self.report(&event);
            }

            if self.battle.phase() == BattlePhase::WaveCleared {
                self.battle.advance_wave();
            }
        }

        /// Demo AI: slide under the most threatening enemy and keep firing
        fn autopilot(&mut self) {
            let player_x = self.battle.player().center().x;
            let enemies = self.battle.enemies();

            let diver = enemies
                .iter()
                .filter(|e| e.is_active() && e.state == EnemyState::Attacking)
                .max_by(|a, b| a.body.pos.y.total_cmp(&b.body.pos.y));
            let lowest = enemies
                .iter()
                .filter(|e| e.is_active() && e.state == EnemyState::InFormation)
                .max_by(|a, b| a.body.pos.y.total_cmp(&b.body.pos.y));

            let target_x = match (diver, lowest) {
                // Step aside from a diver that's close
                (Some(d), _) if d.body.pos.y > self.battle.field().height * 0.6 => {
                    let away = if d.center().x < player_x { 60.0 } else { -60.0 };
                    Some(player_x + away)
                }
                (_, Some(e)) => Some(e.center().x),
                (Some(d), None) => Some(d.center().x),
                (None, None) => None,
            };

            self.input.release(Action::MoveLeft);
            self.input.release(Action::MoveRight);
            if let Some(x) = target_x {
                if x < player_x - 4.0 {
                    self.input.press(Action::MoveLeft);
                } else if x > player_x + 4.0 {
                    self.input.press(Action::MoveRight);
                }
            }
            self.input.press(Action::Fire);
        }

        fn report(&mut self, event: &GameEvent) {
            match event {
                GameEvent::ScoreGained { points } => {
                    self.kills += 1;
                    log::debug!("+{} (score {})", points, self.battle.score());
                }
                GameEvent::Explosion { .. } => {}
                other => log::info!("{:?}", other),
            }
        }
    }

    pub fn run() {
        let mut args = std::env::args().skip(1);
        let tuning = args
            .next()
            .map(|path| Tuning::load_or_default(Path::new(&path)))
            .unwrap_or_default();
        let seconds: f32 = args.next().and_then(|s| s.parse().ok()).unwrap_or(120.0);

        let mut runner = Runner::new(0x5EED, tuning);
        let frames = (seconds / FRAME_DT) as u32;
        for _ in 0..frames {
            runner.frame(FRAME_DT);
            if matches!(runner.battle.phase(), BattlePhase::GameOver | BattlePhase::Victory) {
                break;
            }
        }

        println!(
            "phase={:?} wave={} score={} lives={} kills={} gun={}",
            runner.battle.phase(),
            runner.battle.wave(),
            runner.battle.score(),
            runner.battle.lives(),
            runner.kills,
            runner.battle.player().gun_level().level(),
        );
    }
}

fn main() {
    env_logger::init();
    log::info!("Formation Strike (headless) starting...");
    headless::run();
}
