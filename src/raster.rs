//! Image front end: turns a picture into a grid plus a task, and paints the
//! resulting path back onto it.
//!
//! Obstacles are pixels of the obstacle colour; the start and goal are marked
//! by single pixels of their marker colours. Everything else is walkable.

use image::{Rgb, RgbImage};
use tracing::{debug, info};

use crate::common::{Path, Position, Task};
use crate::config::Colors;
use crate::error::{Error, Result};
use crate::map::Map;

pub fn open(path: &str) -> Result<RgbImage> {
    if !std::path::Path::new(path).exists() {
        return Err(Error::InputMissing {
            path: path.to_string(),
        });
    }
    let img = image::open(path)?.to_rgb8();
    info!("Loaded {path} ({}x{})", img.width(), img.height());
    Ok(img)
}

pub fn save(img: &RgbImage, path: &str) -> Result<()> {
    img.save(path)?;
    info!("Wrote {path}");
    Ok(())
}

/// One cell per pixel; pixels equal to `obstacle` are not walkable.
pub fn load_grid(img: &RgbImage, obstacle: [u8; 3]) -> Result<Map> {
    Map::from_fn(img.width() as usize, img.height() as usize, |(x, y)| {
        img.get_pixel(x as u32, y as u32).0 != obstacle
    })
}

/// First pixel of `color`, scanning rows top to bottom.
pub fn find_pixel(img: &RgbImage, color: [u8; 3]) -> Option<Position> {
    img.enumerate_pixels()
        .find(|(_, _, pixel)| pixel.0 == color)
        .map(|(x, y, _)| (x as usize, y as usize))
}

pub fn locate_task(img: &RgbImage, colors: &Colors) -> Result<Task> {
    let goal =
        find_pixel(img, colors.goal).ok_or(Error::MarkerNotFound { marker: "target" })?;
    let start =
        find_pixel(img, colors.start).ok_or(Error::MarkerNotFound { marker: "start" })?;
    debug!("start {start:?} goal {goal:?}");
    Ok(Task { start, goal })
}

/// Paints `path` in the path colour, then restores the two markers.
pub fn draw_path(img: &mut RgbImage, path: &Path, colors: &Colors) {
    for &(x, y) in &path.steps {
        img.put_pixel(x as u32, y as u32, Rgb(colors.path));
    }
    if let Some((x, y)) = path.first() {
        img.put_pixel(x as u32, y as u32, Rgb(colors.start));
    }
    if let Some((x, y)) = path.last() {
        img.put_pixel(x as u32, y as u32, Rgb(colors.goal));
    }
    info!("Got {} nodes in the path", path.len());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithm::{solve, SearchOptions};

    const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
    const BLACK: Rgb<u8> = Rgb([0, 0, 0]);

    // 5x3 picture with a wall in column 2 that leaves the bottom row open.
    fn walled_image() -> RgbImage {
        let mut img = RgbImage::from_pixel(5, 3, WHITE);
        img.put_pixel(2, 0, BLACK);
        img.put_pixel(2, 1, BLACK);
        img.put_pixel(0, 0, Rgb([255, 0, 0]));
        img.put_pixel(4, 0, Rgb([0, 0, 255]));
        img
    }

    #[test]
    fn test_load_grid_marks_obstacles() {
        let img = walled_image();
        let map = load_grid(&img, [0, 0, 0]).unwrap();
        assert_eq!((map.width, map.height), (5, 3));
        assert!(!map.is_passable(2, 0));
        assert!(!map.is_passable(2, 1));
        assert!(map.is_passable(2, 2));
        // Markers are walkable.
        assert!(map.is_passable(0, 0));
        assert!(map.is_passable(4, 0));
    }

    #[test]
    fn test_find_pixel_scans_rows_first() {
        let mut img = RgbImage::from_pixel(4, 4, WHITE);
        img.put_pixel(3, 1, BLACK);
        img.put_pixel(0, 2, BLACK);
        assert_eq!(find_pixel(&img, [0, 0, 0]), Some((3, 1)));
        assert_eq!(find_pixel(&img, [1, 2, 3]), None);
    }

    #[test]
    fn test_missing_marker() {
        let mut img = walled_image();
        img.put_pixel(4, 0, WHITE);
        assert!(matches!(
            locate_task(&img, &Colors::default()),
            Err(Error::MarkerNotFound { marker: "target" })
        ));

        let mut img = walled_image();
        img.put_pixel(0, 0, WHITE);
        assert!(matches!(
            locate_task(&img, &Colors::default()),
            Err(Error::MarkerNotFound { marker: "start" })
        ));
    }

    #[test]
    fn test_open_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.png");
        let err = open(missing.to_str().unwrap()).unwrap_err();
        assert!(matches!(err, Error::InputMissing { .. }));
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_round_trip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.png");
        let output = dir.path().join("out.png");
        walled_image().save(&input).unwrap();

        let colors = Colors::default();
        let mut img = open(input.to_str().unwrap()).unwrap();
        let task = locate_task(&img, &colors).unwrap();
        assert_eq!(task, Task { start: (0, 0), goal: (4, 0) });

        let mut map = load_grid(&img, colors.obstacle).unwrap();
        let (path, _) = solve(&mut map, &task, &SearchOptions::default()).unwrap();
        assert!(path.verify(&map, &task));
        // The wall forces the route through the bottom row.
        assert!(path.steps.contains(&(2, 2)));

        draw_path(&mut img, &path, &colors);
        save(&img, output.to_str().unwrap()).unwrap();

        let written = open(output.to_str().unwrap()).unwrap();
        assert_eq!(written.get_pixel(0, 0).0, colors.start);
        assert_eq!(written.get_pixel(4, 0).0, colors.goal);
        assert_eq!(written.get_pixel(2, 2).0, colors.path);
        assert_eq!(written.get_pixel(2, 0).0, colors.obstacle);
    }
}
