#[cfg(target_arch = "wasm32")]
use macroquad::miniquad;
use macroquad::prelude::*;
use minimap_core::{
    CustomPalette, DirectionSet, DragTracker, FocusPoint, JoystickSpec, MarkerSet, Minimap,
    MinimapConfig, MinimapState, ScreenPoint, TilePalette, ViewportSpec, World, render_tiles,
};
use minimap_core::minimap::viewport_rect;
use minimap_snapshot::scene;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::draw_commands::{draw_frame, to_color};
use crate::player::{Player, PlayerDrawConfig, draw_player};
use crate::pointer::{HoldButton, drag_events, sample_pointers, stick_pointer};

mod draw_commands;
mod player;
mod pointer;

const FIXED_STEP_SECONDS: f32 = 1.0 / 60.0;
const MAIN_VIEW_RADIUS: i32 = 20;
const SCREEN_MARGIN: f32 = 16.0;
const LEGEND_ROW_HEIGHT: f32 = 18.0;
const LEGEND_FONT_SIZE: f32 = 18.0;
const LEGEND_SWATCH: f32 = 10.0;
const JOYSTICK_BASE_COLOR: Color = Color::new(1.0, 1.0, 1.0, 0.18);
const JOYSTICK_KNOB_COLOR: Color = Color::new(1.0, 1.0, 1.0, 0.55);
const SPRINT_BUTTON_RADIUS: f32 = 32.0;
const SPRINT_BUTTON_COLOR: Color = Color::new(0.85, 0.47, 0.02, 0.8);
const SPRINT_BUTTON_RIM: Color = Color::new(0.98, 0.75, 0.14, 1.0);
const SPRINT_BUTTON_HELD: Color = Color::new(0.98, 0.75, 0.14, 0.9);

static PENDING_DEATH: AtomicBool = AtomicBool::new(false);
static JOYSTICK_ACTIVE: AtomicBool = AtomicBool::new(false);

/// Drops a death marker at the player on the next frame.
#[unsafe(no_mangle)]
pub extern "C" fn minimap_record_death() {
    log_ui_action("record death");
    PENDING_DEATH.store(true, Ordering::SeqCst);
}

#[unsafe(no_mangle)]
pub extern "C" fn minimap_joystick_active() -> i32 {
    if JOYSTICK_ACTIVE.load(Ordering::SeqCst) {
        1
    } else {
        0
    }
}

fn take_pending_death() -> bool {
    PENDING_DEATH.swap(false, Ordering::SeqCst)
}

fn log_ui_action(label: &str) {
    #[cfg(target_arch = "wasm32")]
    miniquad::info!("{}", label);
    #[cfg(not(target_arch = "wasm32"))]
    log::info!("{}", label);
}

fn now_ms() -> u64 {
    (get_time() * 1000.0) as u64
}

fn keyboard_directions(up: bool, left: bool, down: bool, right: bool) -> DirectionSet {
    let mut set = DirectionSet::empty();
    set.set(DirectionSet::UP, up);
    set.set(DirectionSet::LEFT, left);
    set.set(DirectionSet::DOWN, down);
    set.set(DirectionSet::RIGHT, right);
    set
}

fn read_sprint_key() -> bool {
    is_key_down(KeyCode::LeftShift) || is_key_down(KeyCode::RightShift)
}

fn read_keyboard() -> DirectionSet {
    keyboard_directions(
        is_key_down(KeyCode::W) || is_key_down(KeyCode::Up),
        is_key_down(KeyCode::A) || is_key_down(KeyCode::Left),
        is_key_down(KeyCode::S) || is_key_down(KeyCode::Down),
        is_key_down(KeyCode::D) || is_key_down(KeyCode::Right),
    )
}

/// Top-left of the minimap, bottom-left of the screen with room for the legend below it.
fn minimap_origin(screen_height: f32, size: f32, legend_rows: usize) -> Vec2 {
    let legend_height = legend_rows as f32 * LEGEND_ROW_HEIGHT;
    vec2(SCREEN_MARGIN, screen_height - SCREEN_MARGIN - legend_height - size)
}

fn joystick_anchor(width: f32, height: f32, joystick: &JoystickSpec) -> ScreenPoint {
    let half = joystick.size / 2.0;
    ScreenPoint::new(width - SCREEN_MARGIN - half, height - SCREEN_MARGIN - half)
}

/// Sprint button sits left of the joystick base, vertically centred on it.
fn sprint_button(anchor: ScreenPoint, joystick: &JoystickSpec) -> HoldButton {
    let gap = joystick.size / 2.0 + SCREEN_MARGIN + SPRINT_BUTTON_RADIUS;
    HoldButton {
        center: ScreenPoint::new(anchor.x - gap, anchor.y),
        radius: SPRINT_BUTTON_RADIUS,
    }
}

/// Screen-space frame around a minimap drawn with its top-left at `origin`.
fn minimap_border(origin: Vec2, spec: &ViewportSpec) -> Rect {
    let rect = viewport_rect(spec);
    Rect::new(origin.x + rect.x, origin.y + rect.y, rect.width, rect.height)
}

/// Sub-tile shift that keeps the player at the exact view centre while tiles scroll.
fn scroll_offset(focus: FocusPoint, tile_size: f32) -> Vec2 {
    vec2(
        (focus.x.floor() - focus.x) * tile_size,
        (focus.y.floor() - focus.y) * tile_size,
    )
}

/// Optional JSON config path as the first argument; bad files fall back to defaults.
#[cfg(not(target_arch = "wasm32"))]
fn load_config() -> MinimapConfig {
    let Some(path) = std::env::args().nth(1) else {
        return MinimapConfig::default();
    };
    MinimapConfig::load(&path).unwrap_or_else(|err| {
        log::warn!("ignoring config {path}: {err}");
        MinimapConfig::default()
    })
}

#[cfg(target_arch = "wasm32")]
fn load_config() -> MinimapConfig {
    MinimapConfig::default()
}

pub struct GameState {
    world: World,
    minimap: Minimap<CustomPalette>,
    markers: MarkerSet,
    player: Player,
    player_draw: PlayerDrawConfig,
    joystick: JoystickSpec,
    tracker: DragTracker,
    key_directions: DirectionSet,
    stick_directions: DirectionSet,
    key_sprint: bool,
    button_sprint: bool,
    main_view: Option<ViewportSpec>,
}

impl GameState {
    pub fn new(config: MinimapConfig) -> Self {
        let sample = scene::sample_world(scene::DEFAULT_SEED, scene::DEFAULT_RADIUS_CHUNKS);
        let world = match sample {
            Ok(world) => world,
            Err(err) => {
                log::error!("sample world failed, starting empty: {err}");
                World::new()
            }
        };
        let palette = config.palette().unwrap_or_else(|err| {
            log::warn!("palette overrides ignored: {err}");
            CustomPalette::default()
        });
        log::info!("world ready with {} chunks", world.len());

        Self {
            world,
            minimap: Minimap::with_palette(config.viewport, palette),
            markers: config.markers(),
            player: Player::new(FocusPoint::new(0.5, 0.5)),
            player_draw: PlayerDrawConfig::default(),
            joystick: config.joystick,
            tracker: DragTracker::new(config.joystick.max_distance()),
            key_directions: DirectionSet::empty(),
            stick_directions: DirectionSet::empty(),
            key_sprint: false,
            button_sprint: false,
            main_view: None,
        }
    }

    fn directions(&self) -> DirectionSet {
        self.key_directions | self.stick_directions
    }

    fn sprinting(&self) -> bool {
        self.key_sprint || self.button_sprint
    }

    fn fixed_update(&mut self) {
        let sprint = self.sprinting();
        self.player.step(self.directions(), sprint, FIXED_STEP_SECONDS);
        self.markers.prune(now_ms());
    }

    fn handle_keyboard(&mut self) {
        self.key_directions = read_keyboard();
        self.key_sprint = read_sprint_key();
        if is_key_pressed(KeyCode::K) || take_pending_death() {
            self.markers.record_death(self.player.position, now_ms());
        }
    }

    fn handle_pointers(&mut self) {
        let anchor = joystick_anchor(screen_width(), screen_height(), &self.joystick);
        let button = sprint_button(anchor, &self.joystick);
        let samples = sample_pointers();

        let held = button.is_held(&samples);
        if held != self.button_sprint {
            log_ui_action(if held { "sprint on" } else { "sprint off" });
        }
        self.button_sprint = held;

        let events = drag_events(
            stick_pointer(&samples, &button),
            anchor,
            self.joystick.size / 2.0,
            self.tracker.is_dragging(),
        );

        let stick = &mut self.stick_directions;
        let mut sink = |set: DirectionSet| *stick = set;
        for event in events {
            self.tracker.handle(event, &mut sink);
        }
        JOYSTICK_ACTIVE.store(self.tracker.is_dragging(), Ordering::SeqCst);
    }

    fn refresh_main_view(&mut self) {
        let size = screen_width().max(screen_height()).ceil();
        if self.main_view.is_some_and(|spec| spec.size() == size) {
            return;
        }
        let margin = self.minimap.spec().margin();
        match ViewportSpec::new(size, MAIN_VIEW_RADIUS, margin) {
            Ok(spec) => self.main_view = Some(spec),
            Err(err) => log::warn!("main view not resized: {err}"),
        }
    }

    fn render(&self) {
        let background = to_color(self.minimap.palette().fallback());
        clear_background(background);

        if let Some(spec) = &self.main_view {
            self.draw_main_view(spec);
        }

        let state = MinimapState {
            focus: self.player.position,
            markers: self.markers,
            now_ms: now_ms(),
        };
        let frame = self.minimap.render(&state, &self.world);
        let size = self.minimap.spec().size();
        let origin = minimap_origin(screen_height(), size, frame.legend.len());
        draw_frame(&frame.commands, origin);
        let border = minimap_border(origin, self.minimap.spec());
        draw_rectangle_lines(border.x, border.y, border.w, border.h, 2.0, BLACK);

        for (row, entry) in frame.legend.iter().enumerate() {
            let y = origin.y + size + (row as f32 + 1.0) * LEGEND_ROW_HEIGHT;
            draw_rectangle(
                origin.x,
                y - LEGEND_SWATCH,
                LEGEND_SWATCH,
                LEGEND_SWATCH,
                to_color(entry.color),
            );
            draw_text(entry.label, origin.x + LEGEND_SWATCH + 6.0, y, LEGEND_FONT_SIZE, WHITE);
        }

        self.draw_joystick();
        draw_text(
            "WASD / joystick: move    Shift: sprint    K: mark death",
            SCREEN_MARGIN,
            SCREEN_MARGIN + LEGEND_FONT_SIZE,
            LEGEND_FONT_SIZE,
            WHITE,
        );
    }

    fn draw_main_view(&self, spec: &ViewportSpec) {
        let focus = self.player.position;
        let view_origin = vec2(
            (screen_width() - spec.size()) / 2.0,
            (screen_height() - spec.size()) / 2.0,
        ) + scroll_offset(focus, spec.tile_size());

        for cell in render_tiles(focus, spec, &self.world, self.minimap.palette()) {
            draw_rectangle(
                view_origin.x + cell.rect.x,
                view_origin.y + cell.rect.y,
                cell.rect.width,
                cell.rect.height,
                to_color(cell.color),
            );
        }

        let center = vec2(screen_width() / 2.0, screen_height() / 2.0);
        draw_player(&self.player, center, spec.tile_size(), &self.player_draw);
    }

    fn draw_joystick(&self) {
        let anchor = joystick_anchor(screen_width(), screen_height(), &self.joystick);
        let knob = anchor + self.tracker.stick().offset;
        draw_circle(anchor.x, anchor.y, self.joystick.size / 2.0, JOYSTICK_BASE_COLOR);
        draw_circle(knob.x, knob.y, self.joystick.stick_size / 2.0, JOYSTICK_KNOB_COLOR);

        let button = sprint_button(anchor, &self.joystick);
        let fill = if self.button_sprint {
            SPRINT_BUTTON_HELD
        } else {
            SPRINT_BUTTON_COLOR
        };
        let (x, y) = (button.center.x, button.center.y);
        draw_circle(x, y, button.radius, fill);
        draw_circle_lines(x, y, button.radius, 2.0, SPRINT_BUTTON_RIM);
    }
}

pub async fn run() {
    install_panic_hook();
    let mut game = GameState::new(load_config());
    let mut accumulator = 0.0_f32;

    loop {
        game.handle_keyboard();
        game.handle_pointers();

        // Consume real elapsed time in fixed-size simulation steps.
        accumulator += get_frame_time();
        while accumulator >= FIXED_STEP_SECONDS {
            game.fixed_update();
            accumulator -= FIXED_STEP_SECONDS;
        }

        game.refresh_main_view();
        game.render();

        next_frame().await;
    }
}

#[cfg(target_arch = "wasm32")]
fn install_panic_hook() {
    std::panic::set_hook(Box::new(|info| {
        let msg = info.to_string();
        if let Some(location) = info.location() {
            miniquad::error!("panic at {}:{}: {}", location.file(), location.line(), msg);
        } else {
            miniquad::error!("panic: {}", msg);
        }
    }));
}

#[cfg(not(target_arch = "wasm32"))]
fn install_panic_hook() {}
