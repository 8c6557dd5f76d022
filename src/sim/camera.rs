//! Vertical viewport tracking
//!
//! The view only ever scrolls up. A falling player is never followed, which
//! is what eventually ends the run.

/// World-space y of the top edge of the screen
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Camera {
    pub y: f32,
}

impl Camera {
    /// Scroll up once the player climbs above the middle of the screen.
    /// Returns true if the camera moved.
    pub fn follow(&mut self, player_y: f32, screen_height: f32) -> bool {
        let half = (screen_height / 2.0).floor();
        if player_y < self.y + half {
            self.y = player_y - half;
            return true;
        }
        false
    }

    /// Player has dropped a full screen below the top of the view
    pub fn lost_sight_of(&self, player_y: f32, screen_height: f32) -> bool {
        player_y > self.y + screen_height
    }

    /// Convert a world y to a screen y
    #[inline]
    pub fn to_screen(&self, world_y: f32) -> f32 {
        world_y - self.y
    }
}
