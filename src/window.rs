use sdl2::event::Event;
use sdl2::keyboard::{Keycode, Scancode};
use sdl2::pixels::PixelFormatEnum;
use sdl2::rect::Rect;
use tracing::debug;

use crate::player::Controls;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowEvent {
    None,
    Quit,
    Resize(u32, u32),
}

/// Converts timer ticks into per-frame elapsed seconds.
///
/// Frames that took longer than `max_seconds` (window dragged, process
/// suspended) are reported as `None` so the caller skips simulating and
/// rendering them instead of advancing the world by a large jump.
#[derive(Debug, Clone)]
pub struct FrameClock {
    last_ms: Option<u64>,
    max_seconds: f32,
}

impl FrameClock {
    pub fn new(max_seconds: f32) -> Self {
        Self {
            last_ms: None,
            max_seconds,
        }
    }

    /// Records a tick at `now_ms` and returns the seconds since the last one,
    /// or `None` if the tick should be skipped. The first tick is always
    /// skipped since there is nothing to measure against.
    pub fn tick(&mut self, now_ms: u64) -> Option<f32> {
        let last = self.last_ms.replace(now_ms)?;
        let seconds = now_ms.saturating_sub(last) as f32 / 1000.0;
        if seconds < self.max_seconds {
            Some(seconds)
        } else {
            debug!(seconds, "skipping long frame");
            None
        }
    }
}

pub struct FrameLimiter {
    previous_frame_time: u64,
    frame_target_ms: u64,
}

impl FrameLimiter {
    pub fn new(window: &Window, target_fps: u32) -> Self {
        Self {
            previous_frame_time: window.timer().ticks64(),
            frame_target_ms: 1000 / u64::from(target_fps.max(1)),
        }
    }

    /// Sleeps until the target frame time has passed since the previous call.
    pub fn wait(&mut self, window: &Window) {
        let elapsed = window.timer().ticks64().saturating_sub(self.previous_frame_time);
        if elapsed < self.frame_target_ms {
            std::thread::sleep(std::time::Duration::from_millis(self.frame_target_ms - elapsed));
        }
        self.previous_frame_time = window.timer().ticks64();
    }
}

pub struct Window {
    // texture must be declared (and so dropped) before texture_creator.
    texture: sdl2::render::Texture<'static>,
    texture_creator: Box<sdl2::render::TextureCreator<sdl2::video::WindowContext>>,
    canvas: sdl2::render::Canvas<sdl2::video::Window>,
    event_pump: sdl2::EventPump,
    timer_subsystem: sdl2::TimerSubsystem,
    width: u32,
    height: u32,
}

impl Window {
    pub fn new(title: &str, width: u32, height: u32) -> Result<Self, String> {
        let sdl_context = sdl2::init()?;
        let video_subsystem = sdl_context.video()?;
        let timer_subsystem = sdl_context.timer()?;

        let window = video_subsystem
            .window(title, width, height)
            .position_centered()
            .resizable()
            .build()
            .map_err(|e| e.to_string())?;

        let canvas = window.into_canvas().build().map_err(|e| e.to_string())?;
        let texture_creator = Box::new(canvas.texture_creator());
        let event_pump = sdl_context.event_pump()?;

        // SAFETY: texture_creator is heap-allocated and lives as long as Window.
        // texture is dropped before texture_creator by struct field order.
        let texture_creator_ref: &'static sdl2::render::TextureCreator<sdl2::video::WindowContext> =
            unsafe { &*(texture_creator.as_ref() as *const _) };
        let texture = texture_creator_ref
            .create_texture_streaming(PixelFormatEnum::ARGB8888, width, height)
            .map_err(|e| e.to_string())?;

        Ok(Self {
            canvas,
            texture_creator,
            texture,
            event_pump,
            timer_subsystem,
            width,
            height,
        })
    }

    pub fn poll_events(&mut self) -> WindowEvent {
        for event in self.event_pump.poll_iter() {
            match event {
                Event::Quit { .. }
                | Event::KeyDown {
                    keycode: Some(Keycode::Escape),
                    ..
                } => return WindowEvent::Quit,
                Event::Window {
                    win_event: sdl2::event::WindowEvent::Resized(w, h),
                    ..
                } => return WindowEvent::Resize(w as u32, h as u32),
                _ => {}
            }
        }
        WindowEvent::None
    }

    /// Arrow keys currently held down.
    pub fn controls(&self) -> Controls {
        let keys = self.event_pump.keyboard_state();
        Controls {
            left: keys.is_scancode_pressed(Scancode::Left),
            right: keys.is_scancode_pressed(Scancode::Right),
            forward: keys.is_scancode_pressed(Scancode::Up),
            backward: keys.is_scancode_pressed(Scancode::Down),
        }
    }

    pub fn present(&mut self, buffer: &[u8]) -> Result<(), String> {
        self.texture
            .update(None, buffer, (self.width * 4) as usize)
            .map_err(|e| e.to_string())?;

        self.canvas.clear();
        self.canvas
            .copy(&self.texture, None, Some(Rect::new(0, 0, self.width, self.height)))?;
        self.canvas.present();
        Ok(())
    }

    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), String> {
        self.width = width;
        self.height = height;
        // SAFETY: Same as in new() - texture_creator outlives texture
        let texture_creator_ref: &'static sdl2::render::TextureCreator<sdl2::video::WindowContext> =
            unsafe { &*(self.texture_creator.as_ref() as *const _) };
        self.texture = texture_creator_ref
            .create_texture_streaming(PixelFormatEnum::ARGB8888, width, height)
            .map_err(|e| e.to_string())?;
        Ok(())
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn timer(&self) -> &sdl2::TimerSubsystem {
        &self.timer_subsystem
    }
}
