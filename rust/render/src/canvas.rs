// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! 2D immediate-mode adapter
//!
//! Produces the draw calls for one frame of the editor canvas. After the
//! leading [`DrawCommand::SetTransform`] every coordinate is in world units
//! and line widths and font sizes are pre-divided by the zoom so they stay
//! constant on screen.
//!
//! Layering: grid, committed rooms, drawing preview, temporary room, selection.

use floorplan_core::{Color, Editor, Room, Viewport};
use nalgebra::{Point2, Vector2};

const GRID_LINE: Color = Color::rgb(0xdd, 0xdd, 0xdd);
const ROOM_STROKE: Color = Color::rgb(180, 180, 180);
const ROOM_FILL_ALPHA: u8 = 0x50;
const FALLBACK_FILL: Color = Color::rgb(0xa0, 0xc4, 0xff);
const LABEL: Color = Color::BLACK;
const PREVIEW_VALID_FILL: Color = Color::rgba(200, 230, 255, 77);
const PREVIEW_VALID_STROKE: Color = Color::rgb(0x00, 0x66, 0xcc);
const PREVIEW_INVALID_FILL: Color = Color::rgba(255, 100, 100, 77);
const PREVIEW_INVALID_STROKE: Color = Color::rgb(0xcc, 0x00, 0x00);
const TEMP_STROKE: Color = Color::rgb(0x5d, 0x86, 0xc9);
const SELECTION: Color = Color::rgb(0x25, 0x63, 0xeb);

const ROOM_LINE_WIDTH: f64 = 2.0;
const SELECTION_LINE_WIDTH: f64 = 3.0;
const NAME_FONT_SIZE: f64 = 14.0;
const DIMENSION_FONT_SIZE: f64 = 12.0;
const HANDLE_SIZE: f64 = 10.0;

/// Axis-aligned rectangle in world units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl WorldRect {
    pub fn of_room(room: &Room, grid_size: f64) -> Self {
        Self {
            x: room.x as f64 * grid_size,
            y: room.y as f64 * grid_size,
            width: room.width as f64 * grid_size,
            height: room.length as f64 * grid_size,
        }
    }

    pub fn center(&self) -> Point2<f64> {
        Point2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Square of side `size` centred on a point
    pub fn square(center: Point2<f64>, size: f64) -> Self {
        Self {
            x: center.x - size / 2.0,
            y: center.y - size / 2.0,
            width: size,
            height: size,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Center,
    Right,
}

/// One canvas operation
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Clear the whole canvas (screen pixels)
    Clear { width: f64, height: f64 },
    /// Translate by `pan` then scale by `zoom` for the rest of the frame
    SetTransform { pan: Vector2<f64>, zoom: f64 },
    Line {
        from: Point2<f64>,
        to: Point2<f64>,
        color: Color,
        width: f64,
    },
    FillRect { rect: WorldRect, color: Color },
    StrokeRect {
        rect: WorldRect,
        color: Color,
        width: f64,
    },
    Text {
        text: String,
        position: Point2<f64>,
        size: f64,
        color: Color,
        align: TextAlign,
    },
}

/// Grid lines covering the visible world area
pub fn grid_lines(
    viewport: &Viewport,
    grid_size: f64,
    canvas_width: f64,
    canvas_height: f64,
) -> Vec<DrawCommand> {
    let mut commands = Vec::new();
    if grid_size <= 0.0 {
        return commands;
    }

    let (min, max) = viewport.visible_world(canvas_width, canvas_height);
    let width = 1.0 / viewport.zoom;

    let mut x = (min.x / grid_size).floor() * grid_size;
    while x <= max.x {
        commands.push(DrawCommand::Line {
            from: Point2::new(x, min.y),
            to: Point2::new(x, max.y),
            color: GRID_LINE,
            width,
        });
        x += grid_size;
    }

    let mut y = (min.y / grid_size).floor() * grid_size;
    while y <= max.y {
        commands.push(DrawCommand::Line {
            from: Point2::new(min.x, y),
            to: Point2::new(max.x, y),
            color: GRID_LINE,
            width,
        });
        y += grid_size;
    }

    commands
}

fn room_fill(room: &Room) -> Color {
    Color::parse_or(&room.color, FALLBACK_FILL).with_alpha(ROOM_FILL_ALPHA)
}

fn room_body(room: &Room, stroke: Color, grid_size: f64, zoom: f64, out: &mut Vec<DrawCommand>) {
    let rect = WorldRect::of_room(room, grid_size);
    out.push(DrawCommand::FillRect {
        rect,
        color: room_fill(room),
    });
    out.push(DrawCommand::StrokeRect {
        rect,
        color: stroke,
        width: ROOM_LINE_WIDTH / zoom,
    });
    if !room.name.is_empty() {
        out.push(DrawCommand::Text {
            text: room.name.clone(),
            position: rect.center(),
            size: NAME_FONT_SIZE / zoom,
            color: LABEL,
            align: TextAlign::Center,
        });
    }
}

fn selection(room: &Room, grid_size: f64, zoom: f64, out: &mut Vec<DrawCommand>) {
    let rect = WorldRect::of_room(room, grid_size);
    out.push(DrawCommand::StrokeRect {
        rect,
        color: SELECTION,
        width: SELECTION_LINE_WIDTH / zoom,
    });

    let handle = HANDLE_SIZE / zoom;
    for corner in [
        Point2::new(rect.x, rect.y),
        Point2::new(rect.x + rect.width, rect.y),
        Point2::new(rect.x, rect.y + rect.height),
        Point2::new(rect.x + rect.width, rect.y + rect.height),
    ] {
        out.push(DrawCommand::FillRect {
            rect: WorldRect::square(corner, handle),
            color: SELECTION,
        });
    }

    out.push(DrawCommand::Text {
        text: format!("{} m", room.width),
        position: Point2::new(rect.x + rect.width / 2.0, rect.y + 24.0 / zoom),
        size: DIMENSION_FONT_SIZE / zoom,
        color: LABEL,
        align: TextAlign::Center,
    });
    out.push(DrawCommand::Text {
        text: format!("{} m", room.length),
        position: Point2::new(rect.x + rect.width - 12.0 / zoom, rect.y + rect.height / 2.0),
        size: DIMENSION_FONT_SIZE / zoom,
        color: LABEL,
        align: TextAlign::Right,
    });
}

/// Draw calls for the current editor state
pub fn draw_commands(editor: &Editor, canvas_width: f64, canvas_height: f64) -> Vec<DrawCommand> {
    let viewport = editor.viewport();
    let zoom = viewport.zoom;
    let grid_size = editor.config().grid_size;
    let temp = editor.temp_room();

    let mut out = vec![
        DrawCommand::Clear {
            width: canvas_width,
            height: canvas_height,
        },
        DrawCommand::SetTransform {
            pan: viewport.pan,
            zoom,
        },
    ];
    out.extend(grid_lines(viewport, grid_size, canvas_width, canvas_height));

    for room in editor.rooms() {
        if temp.is_some_and(|t| t.id == room.id) {
            continue;
        }
        room_body(room, ROOM_STROKE, grid_size, zoom, &mut out);
    }

    if let Some(preview) = editor.draw_preview() {
        let (fill, stroke) = if preview.valid {
            (PREVIEW_VALID_FILL, PREVIEW_VALID_STROKE)
        } else {
            (PREVIEW_INVALID_FILL, PREVIEW_INVALID_STROKE)
        };
        let rect = WorldRect {
            x: preview.origin.x,
            y: preview.origin.y,
            width: preview.width,
            height: preview.height,
        };
        out.push(DrawCommand::FillRect { rect, color: fill });
        out.push(DrawCommand::StrokeRect {
            rect,
            color: stroke,
            width: ROOM_LINE_WIDTH / zoom,
        });
    }

    if let Some(temp) = temp {
        room_body(temp, TEMP_STROKE, grid_size, zoom, &mut out);
    }

    if let Some(selected) = editor.selected_room() {
        selection(temp.unwrap_or(selected), grid_size, zoom, &mut out);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use floorplan_core::{EditorConfig, GridRect, RoomId};

    #[test]
    fn test_grid_lines_cover_canvas() {
        let viewport = Viewport::default();
        let lines = grid_lines(&viewport, 50.0, 200.0, 100.0);
        // x = 0, 50, .., 200 and y = 0, 50, 100
        assert_eq!(lines.len(), 5 + 3);
        assert!(grid_lines(&viewport, 0.0, 200.0, 100.0).is_empty());
    }

    #[test]
    fn test_room_fill_is_translucent() {
        let room = Room::new("a", "A", GridRect::new(0, 0, 1, 1), "#ffadad");
        assert_eq!(room_fill(&room), Color::rgba(0xff, 0xad, 0xad, 0x50));
        let bad = Room::new("b", "B", GridRect::new(0, 0, 1, 1), "nope");
        assert_eq!(room_fill(&bad).a, 0x50);
    }

    #[test]
    fn test_selection_decorations() {
        let mut editor = Editor::with_rooms(
            EditorConfig::default(),
            vec![Room::new("a", "Den", GridRect::new(1, 1, 3, 2), "#ffadad")],
        );
        editor.select(Some(RoomId::from("a"))).unwrap();
        let commands = draw_commands(&editor, 10.0, 10.0);

        let handles = commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::FillRect { color, .. } if *color == SELECTION))
            .count();
        assert_eq!(handles, 4);

        let labels: Vec<&str> = commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(labels, vec!["Den", "3 m", "2 m"]);
    }
}
