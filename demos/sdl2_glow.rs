use std::{error::Error, rc::Rc, sync::Arc};

use sdl2::event::{Event, WindowEvent};
use sdl2::keyboard::{Keycode, Mod};
use sdl2::video::GLProfile;
use warp_ui::*;

struct State {
    clicks: u32,
    enabled: bool,
    volume: i32,
    slider: Slider,
    name: InputField,
    amount: InputField,
    choice: Option<usize>,
    choice_open: bool,
    tab: Option<usize>,
    scroll: ScrollState,
}

fn map_mouse_button(sdl_mb: sdl2::mouse::MouseButton) -> MouseButton {
    match sdl_mb {
        sdl2::mouse::MouseButton::Left => MouseButton::LEFT,
        sdl2::mouse::MouseButton::Right => MouseButton::RIGHT,
        sdl2::mouse::MouseButton::Middle => MouseButton::MIDDLE,
        _ => MouseButton::NONE,
    }
}

fn map_keymode(sdl_km: Mod) -> KeyMode {
    let mut km = KeyMode::NONE;
    if sdl_km.intersects(Mod::LALTMOD | Mod::RALTMOD) {
        km |= KeyMode::ALT;
    }
    if sdl_km.intersects(Mod::LCTRLMOD | Mod::RCTRLMOD) {
        km |= KeyMode::CTRL;
    }
    if sdl_km.intersects(Mod::LSHIFTMOD | Mod::RSHIFTMOD) {
        km |= KeyMode::SHIFT;
    }
    km
}

fn map_keycode(kc: Keycode) -> KeyCode {
    match kc {
        Keycode::X => KeyCode::X,
        Keycode::V => KeyCode::V,
        Keycode::C => KeyCode::C,
        Keycode::A => KeyCode::A,
        Keycode::Escape => KeyCode::ESCAPE,
        Keycode::Tab => KeyCode::TAB,
        Keycode::Return => KeyCode::ENTER,
        Keycode::Backspace => KeyCode::BACKSPACE,
        Keycode::Delete => KeyCode::DELETE,
        Keycode::Right => KeyCode::RIGHT,
        Keycode::Left => KeyCode::LEFT,
        Keycode::Down => KeyCode::DOWN,
        Keycode::Up => KeyCode::UP,
        _ => KeyCode::NONE,
    }
}

fn key_action(repeat: bool, down: bool) -> KeyAction {
    match (repeat, down) {
        (_, false) => KeyAction::Release,
        (true, true) => KeyAction::Repeat,
        (false, true) => KeyAction::Press,
    }
}

// sdl reports the modifier state after the event, so it replaces the held modifiers
fn feed_key(input: &mut Input, keycode: Option<Keycode>, keymod: Mod, action: KeyAction) {
    let mods = map_keymode(keymod);
    match keycode.map(map_keycode).filter(|code| !code.is_empty()) {
        Some(code) => input.key(code, mods, action),
        None => {
            input.keyup(KeyMode::all());
            input.keydown(mods);
        }
    }
}

struct SdlClipboard(sdl2::clipboard::ClipboardUtil);

impl Clipboard for SdlClipboard {
    fn get_text(&self) -> String {
        if !self.0.has_clipboard_text() {
            return String::new();
        }
        self.0.clipboard_text().unwrap_or_else(|e| {
            log::warn!("clipboard read failed: {}", e);
            String::new()
        })
    }

    fn set_text(&mut self, text: &str) {
        if let Err(e) = self.0.set_clipboard_text(text) {
            log::warn!("clipboard write failed: {}", e);
        }
    }
}

fn panel(ctx: &mut Context<GlowBackend>, state: &mut State) {
    let tabs = ["Widgets", "About"];
    if let Some(tab) = ctx.menu_item_list(&tabs, state.tab, |_, _| {}, false) {
        state.tab = Some(tab);
    }
    ctx.next_line();

    let size = vec2f(420.0, 360.0);
    let mut scroll = state.scroll;
    ctx.div(vec2f(20.0, 70.0), size, Some(&mut scroll), |ctx| match state.tab {
        Some(1) => {
            ctx.set_text_wrap(true);
            ctx.text("An immediate mode UI drawn as one batch of rounded quads. Everything on screen is rebuilt every frame.");
            ctx.set_text_wrap(false);
        }
        _ => {
            if ctx.button("Click me").is_clicked() {
                state.clicks += 1;
            }
            ctx.text(&format!("clicked {} times", state.clicks));
            ctx.next_line();

            ctx.checkbox("enabled", &mut state.enabled, Color::WHITE, Color::NO_COLOR);
            ctx.next_line();

            ctx.slider_int(&mut state.slider, &mut state.volume);
            ctx.text(&format!("volume {}", state.volume));
            ctx.next_line();
            ctx.progress_bar_val(Some(200.0), Some(12.0), 0, 100, state.volume);
            ctx.next_line();

            ctx.input_text(&mut state.name);
            ctx.next_line();
            ctx.input_float(&mut state.amount);
            ctx.next_line();

            ctx.dropdown_menu(&["red", "green", "blue"], "Color", 160.0, 30.0, &mut state.choice, &mut state.choice_open);
            ctx.next_line();

            ctx.separator();
            for i in 0..20 {
                ctx.text(&format!("row {}", i));
                ctx.next_line();
            }
        }
    });
    state.scroll = scroll;
}

fn main() -> Result<(), Box<dyn Error>> {
    let font_path = std::env::args().nth(1).ok_or("usage: sdl2_glow <font.ttf>")?;
    let ttf = std::fs::read(font_path)?;

    let sdl_context = sdl2::init()?;
    let video_subsystem = sdl_context.video()?;
    let gl_attr = video_subsystem.gl_attr();
    gl_attr.set_context_profile(GLProfile::Core);
    gl_attr.set_context_version(4, 5);

    let (mut width, mut height) = (800u32, 600u32);
    let window = video_subsystem.window("warp-ui", width, height).opengl().resizable().build()?;
    let gl_ctx = window.gl_create_context()?;
    window.gl_make_current(&gl_ctx)?;
    let gl = Arc::new(unsafe { glow::Context::from_loader_function(|s| video_subsystem.gl_get_proc_address(s) as *const _) });
    video_subsystem.text_input().start();

    let mut backend = unsafe { GlowBackend::new(gl, width, height)? };
    if !backend.is_ready() {
        return Err("batch shader failed to build".into());
    }
    let (font, rgba) = BakedFont::bake(&ttf, 18.0, 1024, 1024)?;
    let (aw, ah) = font.atlas_size();
    let atlas = backend.create_texture(aw as u32, ah as u32, &rgba, TextureFilter::Linear)?;
    let font: Rc<dyn GlyphProvider> = Rc::new(font.with_texture(atlas));

    let clipboard = Box::new(SdlClipboard(video_subsystem.clipboard()));
    let mut ctx = Context::new(backend, Theme::new(font), clipboard, width, height);
    let mut state = State {
        clicks: 0,
        enabled: true,
        volume: 40,
        slider: Slider::new(0, 100).with_size(200.0, 12.0),
        name: InputField::new(64, 200.0).with_placeholder("name"),
        amount: InputField::new(16, 120.0).with_placeholder("0.0"),
        choice: None,
        choice_open: false,
        tab: Some(0),
        scroll: ScrollState::default(),
    };

    let mut event_pump = sdl_context.event_pump()?;
    'running: loop {
        for event in event_pump.poll_iter() {
            let input = ctx.input_mut();
            match event {
                Event::Quit { .. } => break 'running,
                Event::Window { win_event: WindowEvent::Close, .. } => break 'running,
                Event::Window { win_event: WindowEvent::SizeChanged(w, h), .. } => {
                    width = w as u32;
                    height = h as u32;
                    ctx.resize_display(width, height);
                }
                Event::MouseMotion { x, y, .. } => input.mousemove(x as f32, y as f32),
                Event::MouseWheel { y, .. } => input.scroll(0.0, y as f32),
                Event::MouseButtonDown { x, y, mouse_btn, .. } => {
                    input.mousemove(x as f32, y as f32);
                    input.mousedown(map_mouse_button(mouse_btn));
                }
                Event::MouseButtonUp { x, y, mouse_btn, .. } => {
                    input.mousemove(x as f32, y as f32);
                    input.mouseup(map_mouse_button(mouse_btn));
                }
                Event::KeyDown { keymod, keycode, repeat, .. } => feed_key(input, keycode, keymod, key_action(repeat, true)),
                Event::KeyUp { keymod, keycode, repeat, .. } => feed_key(input, keycode, keymod, key_action(repeat, false)),
                Event::TextInput { text, .. } => input.text(text.as_str()),
                _ => {}
            }
        }

        ctx.backend_mut().clear(color(0x30, 0x30, 0x30, 255));
        ctx.frame(|ctx| panel(ctx, &mut state));
        window.gl_swap_window();

        ::std::thread::sleep(::std::time::Duration::new(0, 1_000_000_000u32 / 60));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn held_backspace_reaches_input_as_press_then_repeats() {
        let mut input = Input::default();
        feed_key(&mut input, Some(Keycode::Backspace), Mod::NOMOD, key_action(false, true));
        assert!(input.key_down(KeyCode::BACKSPACE));
        assert_eq!(input.key_event().map(|e| e.action), Some(KeyAction::Press));

        feed_key(&mut input, Some(Keycode::Backspace), Mod::NOMOD, key_action(true, true));
        assert!(input.key_repeated(KeyCode::BACKSPACE));
        assert!(input.key_pressed(KeyCode::BACKSPACE));
        assert_eq!(input.key_event().map(|e| e.action), Some(KeyAction::Repeat));

        feed_key(&mut input, Some(Keycode::Backspace), Mod::NOMOD, key_action(false, false));
        assert!(!input.key_held(KeyCode::BACKSPACE));
        assert_eq!(input.key_event().map(|e| e.action), Some(KeyAction::Release));
    }

    #[test]
    fn modifier_keys_only_update_modifiers() {
        let mut input = Input::default();
        feed_key(&mut input, Some(Keycode::LCtrl), Mod::LCTRLMOD, KeyAction::Press);
        assert_eq!(input.key_mods(), KeyMode::CTRL);
        assert_eq!(input.key_event(), None);

        feed_key(&mut input, Some(Keycode::V), Mod::LCTRLMOD, KeyAction::Press);
        assert_eq!(input.key_event().map(|e| e.mods), Some(KeyMode::CTRL));

        feed_key(&mut input, Some(Keycode::LCtrl), Mod::NOMOD, KeyAction::Release);
        assert_eq!(input.key_mods(), KeyMode::NONE);
        assert!(input.key_held(KeyCode::V));
    }
}
