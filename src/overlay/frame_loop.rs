//! Cooperative single-threaded frame loop.
//!
//! Each iteration drains the message queue without blocking, then, while
//! still running, renders and presents exactly one frame. The loop is a busy
//! loop: present interval zero and no sleeps.

use super::types::{FrameUniform, LoopState, PumpStatus};
use crate::error::OverlayResult;

/// Frames between debug-level progress lines.
const PROGRESS_INTERVAL: u64 = 10_000;

/// Source of OS messages for the loop.
pub trait MessagePump {
    /// Dispatch every queued message without waiting. Returns `Quit` as soon
    /// as a destroy or quit message is seen.
    fn drain(&mut self) -> PumpStatus;
}

/// Something that can draw and present one frame.
pub trait FrameRenderer {
    fn render_frame(&mut self, uniform: &FrameUniform) -> OverlayResult<()>;
}

/// Loop state plus the time uniform it owns.
///
/// Elapsed time is derived from the frame count in `f64`; an `f32`
/// accumulator stops moving once the step drops below half an ulp.
#[derive(Debug, Clone)]
pub struct FrameLoop {
    state: LoopState,
    uniform: FrameUniform,
    time_step: f64,
    frames: u64,
}

impl FrameLoop {
    pub fn new(time_step: f32) -> Self {
        Self {
            state: LoopState::Running,
            uniform: FrameUniform::default(),
            time_step: f64::from(time_step),
            frames: 0,
        }
    }

    /// A loop that has already rendered `frames` frames.
    #[cfg(test)]
    pub(crate) fn resume_at(time_step: f32, frames: u64) -> Self {
        let mut frame_loop = Self::new(time_step);
        frame_loop.frames = frames;
        frame_loop.uniform = FrameUniform::at(frame_loop.elapsed());
        frame_loop
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn uniform(&self) -> &FrameUniform {
        &self.uniform
    }

    /// Frames rendered so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Seconds of shader time after the frames rendered so far.
    pub fn elapsed(&self) -> f64 {
        self.frames as f64 * self.time_step
    }

    /// One iteration. Once terminated, further calls do nothing.
    pub fn tick<P, R>(&mut self, pump: &mut P, renderer: &mut R) -> OverlayResult<LoopState>
    where
        P: MessagePump,
        R: FrameRenderer,
    {
        if self.state == LoopState::Terminated {
            return Ok(self.state);
        }

        if pump.drain() == PumpStatus::Quit {
            log::info!("[frame_loop] Quit observed after {} frames", self.frames);
            self.state = LoopState::Terminated;
            return Ok(self.state);
        }

        self.uniform = FrameUniform::at((self.frames + 1) as f64 * self.time_step);
        renderer.render_frame(&self.uniform)?;
        self.frames += 1;

        if self.frames % PROGRESS_INTERVAL == 0 {
            log::debug!(
                "[frame_loop] {} frames, time={:.3}",
                self.frames,
                self.elapsed()
            );
        } else {
            log::trace!("[frame_loop] frame {}", self.frames);
        }

        Ok(self.state)
    }

    /// Run until terminated. Returns the number of frames rendered.
    pub fn run<P, R>(&mut self, pump: &mut P, renderer: &mut R) -> OverlayResult<u64>
    where
        P: MessagePump,
        R: FrameRenderer,
    {
        log::info!("[frame_loop] Entering render loop");
        while self.tick(pump, renderer)? == LoopState::Running {}
        Ok(self.frames)
    }
}

#[cfg(windows)]
pub use win::Win32MessagePump;

#[cfg(windows)]
mod win {
    use windows::Win32::UI::WindowsAndMessaging::{
        DispatchMessageW, PeekMessageW, TranslateMessage, MSG, PM_REMOVE, WM_DESTROY, WM_QUIT,
    };

    use super::MessagePump;
    use crate::overlay::types::PumpStatus;

    /// Drains the calling thread's queue with `PeekMessageW(PM_REMOVE)`.
    ///
    /// Filters on no window: `WM_QUIT` is thread-level and would never match
    /// a window filter.
    #[derive(Debug, Default)]
    pub struct Win32MessagePump;

    impl MessagePump for Win32MessagePump {
        fn drain(&mut self) -> PumpStatus {
            let mut msg = MSG::default();
            unsafe {
                while PeekMessageW(&mut msg, None, 0, 0, PM_REMOVE).as_bool() {
                    if msg.message == WM_QUIT {
                        return PumpStatus::Quit;
                    }
                    let _ = TranslateMessage(&msg);
                    DispatchMessageW(&msg);
                    // Don't wait a pass for the WM_QUIT this posts.
                    if msg.message == WM_DESTROY {
                        return PumpStatus::Quit;
                    }
                }
            }
            PumpStatus::Idle
        }
    }
}
