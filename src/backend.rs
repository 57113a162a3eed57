//! winit window with a softbuffer surface.
//!
//! The staging buffer keeps `Abgr8` cells exactly as the decoder produced
//! them; conversion to softbuffer's `0x00RRGGBB` words happens on present.

use std::num::NonZeroU32;
use std::rc::Rc;

use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{Key as LogicalKey, NamedKey};
use winit::window::{Window as OsWindow, WindowId};

use crate::error::ViewError;
use crate::pixel::{BYTES_PER_PIXEL, abgr_to_xrgb};
use crate::present::{Surface, SurfaceLock};
use crate::viewer::{Control, Event, Key, Viewer, Window, WindowSpec};

fn window_error(e: impl std::fmt::Display) -> ViewError {
    ViewError::Window(e.to_string())
}

/// An OS window plus its software-rendered surface.
pub struct SoftWindow {
    window: Rc<OsWindow>,
    surface: softbuffer::Surface<Rc<OsWindow>, Rc<OsWindow>>,
    staging: Vec<u8>,
    width: u32,
    height: u32,
}

impl SoftWindow {
    pub fn create(event_loop: &ActiveEventLoop, spec: &WindowSpec) -> Result<Self, ViewError> {
        let attributes = OsWindow::default_attributes()
            .with_title(spec.title.as_str())
            .with_inner_size(PhysicalSize::new(spec.width, spec.height));
        let window = Rc::new(event_loop.create_window(attributes).map_err(window_error)?);
        let context = softbuffer::Context::new(window.clone()).map_err(window_error)?;
        let surface = softbuffer::Surface::new(&context, window.clone()).map_err(window_error)?;
        Ok(Self {
            window,
            surface,
            staging: Vec::new(),
            width: 0,
            height: 0,
        })
    }
}

impl Surface for SoftWindow {
    fn visible_size(&self) -> (u32, u32) {
        let size = self.window.inner_size();
        (size.width, size.height)
    }

    fn configure(&mut self, width: u32, height: u32) -> Result<(), ViewError> {
        let (Some(w), Some(h)) = (NonZeroU32::new(width), NonZeroU32::new(height)) else {
            return Err(ViewError::Window(format!(
                "cannot create a {width}x{height} surface"
            )));
        };
        if (width, height) != (self.width, self.height) {
            self.surface.resize(w, h).map_err(window_error)?;
            let bytes = (width as usize)
                .checked_mul(height as usize)
                .and_then(|px| px.checked_mul(BYTES_PER_PIXEL))
                .ok_or_else(|| ViewError::Window(format!("{width}x{height} surface too large")))?;
            self.staging.clear();
            self.staging.resize(bytes, 0);
            self.width = width;
            self.height = height;
        }
        Ok(())
    }

    fn lock(&mut self) -> Result<SurfaceLock<'_>, ViewError> {
        Ok(SurfaceLock {
            bytes: &mut self.staging,
            stride: self.width as usize * BYTES_PER_PIXEL,
            width: self.width,
            height: self.height,
        })
    }

    fn present(&mut self) -> Result<(), ViewError> {
        let mut buffer = self.surface.buffer_mut().map_err(window_error)?;
        let (cells, _) = self.staging.as_chunks::<BYTES_PER_PIXEL>();
        for (word, cell) in buffer.iter_mut().zip(cells) {
            *word = abgr_to_xrgb(*cell);
        }
        self.window.pre_present_notify();
        buffer.present().map_err(window_error)
    }
}

impl Window for SoftWindow {
    fn set_title(&mut self, title: &str) {
        self.window.set_title(title);
    }

    fn set_size(&mut self, width: u32, height: u32) {
        // None means the resize arrives later as a Resized event.
        let _ = self
            .window
            .request_inner_size(PhysicalSize::new(width, height));
    }
}

/// winit application driving a [`Viewer`].
pub struct App {
    viewer: Viewer,
    window: Option<SoftWindow>,
    error: Option<ViewError>,
}

impl App {
    pub fn new(viewer: Viewer) -> Self {
        Self {
            viewer,
            window: None,
            error: None,
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, e: ViewError) {
        log::error!("{e}");
        self.error = Some(e);
        event_loop.exit();
    }
}

fn translate(event: WindowEvent) -> Option<Event> {
    match event {
        WindowEvent::CloseRequested => Some(Event::Quit),
        WindowEvent::KeyboardInput {
            event:
                KeyEvent {
                    logical_key,
                    state: ElementState::Pressed,
                    ..
                },
            ..
        } => Some(Event::KeyPressed(translate_key(&logical_key))),
        WindowEvent::DroppedFile(path) => Some(Event::FileDropped(path)),
        WindowEvent::RedrawRequested => Some(Event::RedrawRequested),
        _ => None,
    }
}

fn translate_key(key: &LogicalKey) -> Key {
    match key {
        LogicalKey::Named(NamedKey::Escape) => Key::Escape,
        LogicalKey::Character(s) => s.chars().next().map_or(Key::Other, Key::Character),
        _ => Key::Other,
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        let spec = self.viewer.initial_window();
        let mut window = match SoftWindow::create(event_loop, &spec) {
            Ok(window) => window,
            Err(e) => return self.fail(event_loop, e),
        };
        if let Err(e) = self.viewer.present(&mut window) {
            return self.fail(event_loop, e);
        }
        self.window = Some(window);
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        let Some(event) = translate(event) else {
            return;
        };
        let Some(window) = self.window.as_mut() else {
            return;
        };
        match self.viewer.handle(event, window) {
            Ok(Control::Continue) => {}
            Ok(Control::Exit) => event_loop.exit(),
            Err(e) => self.fail(event_loop, e),
        }
    }
}

/// Create the event loop and run `viewer` until it exits.
///
/// Window creation and presentation failures are returned as errors.
pub fn run(viewer: Viewer) -> Result<(), ViewError> {
    let event_loop = EventLoop::new().map_err(window_error)?;
    event_loop.set_control_flow(ControlFlow::Wait);
    let mut app = App::new(viewer);
    event_loop.run_app(&mut app).map_err(window_error)?;
    match app.error.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
