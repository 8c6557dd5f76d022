//! World-space primitives rasterised onto the canvas

use glam::Vec2;

use super::canvas::{Canvas, Rgb};
use crate::sim::{Bullet, Camera, Enemy, Platform, PlatformKind, Player};

/// Colors for game elements
pub mod colors {
    use super::Rgb;

    pub const BACKGROUND: Rgb = Rgb(255, 255, 255);
    pub const TEXT: Rgb = Rgb(0, 0, 0);
    pub const OVERLAY_TEXT: Rgb = Rgb(255, 255, 255);
    pub const GOLD: Rgb = Rgb(255, 215, 0);
    pub const PLAYER: Rgb = Rgb(0, 0, 255);
    pub const EYE: Rgb = Rgb(255, 255, 255);
    pub const ENEMY: Rgb = Rgb(255, 0, 0);
    pub const BULLET: Rgb = Rgb(0, 0, 0);
    pub const PLATFORM_NORMAL: Rgb = Rgb(0, 255, 0);
    pub const PLATFORM_DISAPPEARING: Rgb = Rgb(255, 165, 0);
    pub const PLATFORM_MOVING: Rgb = Rgb(255, 0, 0);
    pub const BUTTON_START: Rgb = Rgb(0, 255, 0);
    pub const BUTTON_START_HOVER: Rgb = Rgb(100, 255, 100);
    pub const BUTTON_QUIT: Rgb = Rgb(255, 0, 0);
    pub const BUTTON_QUIT_HOVER: Rgb = Rgb(255, 100, 100);
}

pub fn platform_color(kind: PlatformKind) -> Rgb {
    match kind {
        PlatformKind::Normal => colors::PLATFORM_NORMAL,
        PlatformKind::Disappearing => colors::PLATFORM_DISAPPEARING,
        PlatformKind::Moving => colors::PLATFORM_MOVING,
    }
}

/// Maps screen-space world units onto canvas pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub scale: Vec2,
}

impl Viewport {
    pub fn new(screen_width: f32, screen_height: f32, canvas: &Canvas) -> Self {
        Self {
            scale: Vec2::new(
                canvas.width() as f32 / screen_width.max(1.0),
                canvas.height() as f32 / screen_height.max(1.0),
            ),
        }
    }

    /// Pixel rectangle `(x, y, w, h)` covering a screen-space box, at least 1x1
    pub fn rect(&self, pos: Vec2, size: Vec2) -> (i32, i32, i32, i32) {
        let x0 = (pos.x * self.scale.x).floor() as i32;
        let y0 = (pos.y * self.scale.y).floor() as i32;
        let x1 = ((pos.x + size.x) * self.scale.x).ceil() as i32;
        let y1 = ((pos.y + size.y) * self.scale.y).ceil() as i32;
        (x0, y0, (x1 - x0).max(1), (y1 - y0).max(1))
    }
}

fn to_screen(camera: &Camera, pos: Vec2) -> Vec2 {
    Vec2::new(pos.x, camera.to_screen(pos.y))
}

fn fill_world_rect(canvas: &mut Canvas, view: &Viewport, pos: Vec2, size: Vec2, c: Rgb) {
    let (x, y, w, h) = view.rect(pos, size);
    canvas.fill_rect(x, y, w, h, c);
}

pub fn draw_platform(canvas: &mut Canvas, view: &Viewport, camera: &Camera, platform: &Platform) {
    if !platform.visible {
        return;
    }
    let pos = to_screen(camera, platform.pos);
    fill_world_rect(canvas, view, pos, platform.size, platform_color(platform.kind()));
}

/// Body with an eye on the side it faces
fn draw_creature(canvas: &mut Canvas, view: &Viewport, pos: Vec2, size: Vec2, facing_right: bool, c: Rgb) {
    fill_world_rect(canvas, view, pos, size, c);

    let eye = size * 0.2;
    let eye_x = if facing_right {
        pos.x + size.x - eye.x * 1.5
    } else {
        pos.x + eye.x * 0.5
    };
    fill_world_rect(canvas, view, Vec2::new(eye_x, pos.y + eye.y), eye, colors::EYE);
}

pub fn draw_player(canvas: &mut Canvas, view: &Viewport, camera: &Camera, player: &Player) {
    let pos = to_screen(camera, player.body.pos);
    draw_creature(canvas, view, pos, player.body.size, player.facing_right, colors::PLAYER);
    for bullet in &player.bullets {
        draw_bullet(canvas, view, camera, bullet);
    }
}

pub fn draw_enemy(canvas: &mut Canvas, view: &Viewport, camera: &Camera, enemy: &Enemy) {
    if !enemy.alive {
        return;
    }
    let pos = to_screen(camera, enemy.body.pos);
    draw_creature(canvas, view, pos, enemy.body.size, enemy.facing_right(), colors::ENEMY);
}

pub fn draw_bullet(canvas: &mut Canvas, view: &Viewport, camera: &Camera, bullet: &Bullet) {
    if !bullet.active {
        return;
    }
    let pos = to_screen(camera, bullet.body.pos);
    fill_world_rect(canvas, view, pos, bullet.body.size, colors::BULLET);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Settings;

    #[test]
    fn test_viewport_scales_world_to_canvas() {
        // 80 cols x 30 rows = 80 x 60 pixels for an 800 x 600 world
        let canvas = Canvas::new(80, 30, colors::BACKGROUND);
        let view = Viewport::new(800.0, 600.0, &canvas);
        assert_eq!(view.rect(Vec2::new(100.0, 200.0), Vec2::new(100.0, 20.0)), (10, 20, 10, 2));
        // Tiny things still get a pixel
        assert_eq!(view.rect(Vec2::new(100.0, 200.0), Vec2::new(0.0, 0.0)), (10, 20, 1, 1));
    }

    #[test]
    fn test_platform_drawn_relative_to_camera() {
        let settings = Settings::default();
        let mut canvas = Canvas::new(80, 30, colors::BACKGROUND);
        let view = Viewport::new(settings.screen_width, settings.screen_height, &canvas);
        let camera = Camera { y: -1000.0 };
        let platform = Platform::new(Vec2::new(100.0, -800.0), PlatformKind::Moving, &settings);

        draw_platform(&mut canvas, &view, &camera, &platform);
        assert_eq!(canvas.get(10, 20), colors::PLATFORM_MOVING);
        assert_eq!(canvas.get(10, 19), colors::BACKGROUND);
    }

    #[test]
    fn test_dead_enemy_not_drawn() {
        let settings = Settings::default();
        let mut canvas = Canvas::new(80, 30, colors::BACKGROUND);
        let view = Viewport::new(settings.screen_width, settings.screen_height, &canvas);
        let mut enemy = Enemy::new(Vec2::new(100.0, 100.0), 2.0, &settings);
        enemy.alive = false;
        draw_enemy(&mut canvas, &view, &Camera::default(), &enemy);
        assert_eq!(canvas.get(11, 11), colors::BACKGROUND);
    }
}
