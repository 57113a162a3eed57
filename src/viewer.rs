//! The viewer state machine.
//!
//! A [`Viewer`] owns at most one active [`Image`]. Events are handled one at a
//! time and run to completion: a file drop decodes, swaps and redraws before
//! the next event is looked at.

use std::path::{Path, PathBuf};

use crate::config::ViewerConfig;
use crate::decode::decode_file;
use crate::error::ViewError;
use crate::image::Image;
use crate::present::{Presenter, Surface};
use enough::Unstoppable;

/// The window the viewer draws into.
pub trait Window: Surface {
    fn set_title(&mut self, title: &str);

    /// Ask for the visible area to become `width` x `height` pixels.
    fn set_size(&mut self, width: u32, height: u32);
}

/// Key identifiers the viewer distinguishes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    Escape,
    Character(char),
    Other,
}

impl Key {
    /// Escape and `q` close the viewer.
    pub fn is_cancel(self) -> bool {
        matches!(self, Key::Escape | Key::Character('q' | 'Q'))
    }
}

/// Input events, already translated from the window system.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    Quit,
    KeyPressed(Key),
    FileDropped(PathBuf),
    /// The platform lost the window contents and wants them drawn again.
    RedrawRequested,
}

/// What the event loop should do after an event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Control {
    Continue,
    Exit,
}

#[derive(Debug, Default)]
pub enum ViewerState {
    #[default]
    Empty,
    Showing(Image),
}

/// Title and size to create the window with.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WindowSpec {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

pub struct Viewer {
    state: ViewerState,
    presenter: Presenter,
    config: ViewerConfig,
}

impl Viewer {
    pub fn new(config: ViewerConfig) -> Self {
        Self {
            state: ViewerState::Empty,
            presenter: Presenter::new(config.fallback_color),
            config,
        }
    }

    /// Create a viewer and, if `path` is given, decode it before any window
    /// exists. A failed startup decode is logged and leaves the viewer empty.
    pub fn startup(config: ViewerConfig, path: Option<&Path>) -> Self {
        let mut viewer = Self::new(config);
        if let Some(path) = path {
            match decode_file(path, Some(&viewer.config.limits), Unstoppable) {
                Ok(image) => {
                    log::info!("loaded {image}");
                    viewer.state = ViewerState::Showing(image);
                }
                Err(e) => log::error!("{e}"),
            }
        }
        viewer
    }

    pub fn state(&self) -> &ViewerState {
        &self.state
    }

    pub fn active_image(&self) -> Option<&Image> {
        match &self.state {
            ViewerState::Empty => None,
            ViewerState::Showing(image) => Some(image),
        }
    }

    /// Window title and size matching the current state.
    pub fn initial_window(&self) -> WindowSpec {
        match &self.state {
            ViewerState::Showing(image) => WindowSpec {
                title: image.source().to_owned(),
                width: image.width(),
                height: image.height(),
            },
            ViewerState::Empty => WindowSpec {
                title: self.config.title.clone(),
                width: self.config.default_width,
                height: self.config.default_height,
            },
        }
    }

    /// Draw the current state and present it.
    pub fn present<W: Window + ?Sized>(&self, window: &mut W) -> Result<(), ViewError> {
        self.presenter.draw(self.active_image(), window)
    }

    /// Decode `path` and make it the active image.
    ///
    /// On error the previous state is left untouched and nothing is drawn.
    pub fn load<W: Window + ?Sized>(
        &mut self,
        path: &Path,
        window: &mut W,
    ) -> Result<(), ViewError> {
        let image = decode_file(path, Some(&self.config.limits), Unstoppable)?;
        let previous = std::mem::replace(&mut self.state, ViewerState::Showing(image));
        drop(previous);

        if let ViewerState::Showing(image) = &self.state {
            log::info!("loaded {image}");
            window.set_title(image.source());
            window.set_size(image.width(), image.height());
        }
        self.present(window)
    }

    /// Handle one event.
    ///
    /// Decode failures are reported and swallowed; only window errors are
    /// returned.
    pub fn handle<W: Window + ?Sized>(
        &mut self,
        event: Event,
        window: &mut W,
    ) -> Result<Control, ViewError> {
        match event {
            Event::Quit => Ok(Control::Exit),
            Event::KeyPressed(key) if key.is_cancel() => Ok(Control::Exit),
            Event::KeyPressed(_) => Ok(Control::Continue),
            Event::FileDropped(path) => match self.load(&path, window) {
                Ok(()) => Ok(Control::Continue),
                Err(e) if e.is_decode_error() => {
                    log::error!("{e}");
                    Ok(Control::Continue)
                }
                Err(e) => Err(e),
            },
            Event::RedrawRequested => {
                self.present(window)?;
                Ok(Control::Continue)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cancel_keys() {
        assert!(Key::Escape.is_cancel());
        assert!(Key::Character('q').is_cancel());
        assert!(Key::Character('Q').is_cancel());
        assert!(!Key::Character('w').is_cancel());
        assert!(!Key::Other.is_cancel());
    }

    #[test]
    fn empty_viewer_uses_config_defaults() {
        let viewer = Viewer::new(
            ViewerConfig::default()
                .with_title("empty")
                .with_default_size(320, 240),
        );
        assert!(viewer.active_image().is_none());
        assert_eq!(
            viewer.initial_window(),
            WindowSpec {
                title: "empty".into(),
                width: 320,
                height: 240
            }
        );
    }

    #[test]
    fn startup_with_missing_file_stays_empty() {
        let viewer = Viewer::startup(
            ViewerConfig::default(),
            Some(Path::new("/definitely/not/here.ppm")),
        );
        assert!(matches!(viewer.state(), ViewerState::Empty));
        assert_eq!(viewer.initial_window().title, "imgv");
        assert_eq!(viewer.initial_window().width, 500);
    }
}
