#![cfg(feature = "integration-tests")]

use ember_ngin::{
    context::{Context, InitContext},
    flow::{self, Stage, StageConstructor, WindowConfig},
    renderer::{FrameQueue, Renderer},
};

/// Drives the full loop for a few frames against a real device and window,
/// then requests an exit. Catches pipeline/bind-group layout mismatches
/// that only surface at render time.
#[test]
fn renders_a_few_frames_and_exits_cleanly() {
    struct Countdown {
        frames: u32,
    }

    impl Stage for Countdown {
        fn on_update(
            &mut self,
            ctx: &mut Context,
            _renderer: &mut Renderer,
            _dt: std::time::Duration,
        ) {
            self.frames += 1;
            if self.frames >= 3 {
                ctx.request_exit();
            }
        }

        fn on_render<'a>(&'a self, frame: &mut FrameQueue<'a>) {
            frame.push_background();
        }
    }

    let constructor: StageConstructor = Box::new(|_: InitContext| {
        Box::pin(async { Box::new(Countdown { frames: 0 }) as Box<dyn Stage> })
    });

    flow::run(WindowConfig::default(), vec![constructor]).unwrap();
}
