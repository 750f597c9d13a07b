use eyre::{eyre, Result};
use log::debug;
use sdl2::{
    event::{Event, WindowEvent},
    keyboard::Keycode,
    video::Window,
    video::{GLContext, GLProfile, SwapInterval},
    EventPump, Sdl, VideoSubsystem,
};

use crate::{config::Config, ogl};

pub struct MyWindow {
    _sdl_context: Sdl,
    _video_subsystem: VideoSubsystem,
    window: Window,
    _gl_ctx: GLContext,
    event_pump: EventPump,
    size: (u32, u32),
}

/// What happened to the window while the last frame's events were processed
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameOutcome {
    pub should_quit: bool,
    /// The latest size if the window was resized
    pub resized: Option<(u32, u32)>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum WindowAction {
    Close,
    Resize(u32, u32),
}

impl MyWindow {
    pub fn new(config: &Config) -> Result<Self> {
        let sdl_context = sdl2::init().map_err(|e| eyre!("{e}"))?;
        let video_subsystem = sdl_context.video().map_err(|e| eyre!("{e}"))?;

        // Context attributes have to be set before the window is created
        let gl_attr = video_subsystem.gl_attr();
        gl_attr.set_context_major_version(4);
        gl_attr.set_context_minor_version(6);
        gl_attr.set_context_profile(GLProfile::Core);
        if config.gl_debug {
            gl_attr.set_context_flags().debug().set();
        }
        gl_attr.set_double_buffer(true);

        let window = video_subsystem
            .window(&config.title, config.width, config.height)
            .opengl()
            .resizable()
            .position_centered()
            .build()?;

        let gl_ctx = window.gl_create_context().map_err(|e| eyre!("{e}"))?;
        window.gl_make_current(&gl_ctx).map_err(|e| eyre!("{e}"))?;

        gl::load_with(|s| video_subsystem.gl_get_proc_address(s) as *const _);
        ogl::check_loaded()?;

        let interval = if config.no_vsync {
            SwapInterval::Immediate
        } else {
            SwapInterval::VSync
        };
        video_subsystem
            .gl_set_swap_interval(interval)
            .map_err(|e| eyre!("{e}"))?;

        let event_pump = sdl_context.event_pump().map_err(|e| eyre!("{e}"))?;

        Ok(Self {
            _sdl_context: sdl_context,
            _video_subsystem: video_subsystem,
            window,
            _gl_ctx: gl_ctx,
            event_pump,
            size: (config.width, config.height),
        })
    }

    pub fn size(&self) -> (u32, u32) {
        self.size
    }

    /// Presents the frame and processes pending events
    pub fn end_frame(&mut self) -> FrameOutcome {
        self.window.gl_swap_window();

        let actions = self.event_pump.poll_iter().filter_map(|e| classify(&e));
        let outcome = FrameOutcome::from_actions(actions);

        if let Some((width, height)) = outcome.resized {
            debug!("Window resized to {width}x{height}");
            self.size = (width, height);
        }

        outcome
    }
}

impl FrameOutcome {
    /// Folds one frame's actions, the last resize wins
    fn from_actions(actions: impl IntoIterator<Item = WindowAction>) -> Self {
        actions.into_iter().fold(Self::default(), |mut outcome, action| {
            match action {
                WindowAction::Close => outcome.should_quit = true,
                WindowAction::Resize(width, height) => outcome.resized = Some((width, height)),
            }
            outcome
        })
    }
}

fn classify(event: &Event) -> Option<WindowAction> {
    match event {
        Event::Quit { .. } => Some(WindowAction::Close),
        Event::KeyDown {
            keycode: Some(Keycode::Escape),
            repeat: false,
            ..
        } => Some(WindowAction::Close),
        Event::Window {
            win_event: WindowEvent::Resized(w, h) | WindowEvent::SizeChanged(w, h),
            ..
        } => Some(WindowAction::Resize((*w).max(0) as u32, (*h).max(0) as u32)),
        _ => None,
    }
}
