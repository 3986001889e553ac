use image::{Rgb, RgbImage};

use crate::domain::detection::Detection;

/// Paleta cíclica: cada clase toma un color estable por su índice.
const PALETTE: [[u8; 3]; 6] = [
    [255, 56, 56],
    [255, 157, 151],
    [72, 249, 10],
    [26, 147, 52],
    [61, 219, 134],
    [0, 212, 187],
];

/// Dibuja las detecciones sobre la imagen: caja hueca del color de su
/// clase y una franja rellena sobre el borde superior a modo de etiqueta.
/// Las coordenadas se recortan a los límites de la imagen.
pub(crate) fn draw_detections(image: &mut RgbImage, detections: &[Detection]) {
    if image.width() == 0 || image.height() == 0 {
        return;
    }
    for det in detections {
        let color = Rgb(PALETTE[det.class_id % PALETTE.len()]);
        let left = det.x1.round() as i32;
        let top = det.y1.round() as i32;
        let right = det.x2.round() as i32;
        let bottom = det.y2.round() as i32;

        draw_box(image, left, top, right, bottom, color);
        fill_strip(image, left, top - 6, right, top - 1, color);
    }
}

fn draw_box(image: &mut RgbImage, left: i32, top: i32, right: i32, bottom: i32, color: Rgb<u8>) {
    let width = image.width() as i32;
    let height = image.height() as i32;
    let left = left.clamp(0, width - 1);
    let right = right.clamp(0, width - 1);
    let top = top.clamp(0, height - 1);
    let bottom = bottom.clamp(0, height - 1);

    for x in left..=right {
        *image.get_pixel_mut(x as u32, top as u32) = color;
        *image.get_pixel_mut(x as u32, bottom as u32) = color;
    }
    for y in top..=bottom {
        *image.get_pixel_mut(left as u32, y as u32) = color;
        *image.get_pixel_mut(right as u32, y as u32) = color;
    }
}

fn fill_strip(image: &mut RgbImage, left: i32, top: i32, right: i32, bottom: i32, color: Rgb<u8>) {
    let width = image.width() as i32;
    let height = image.height() as i32;
    let left = left.clamp(0, width - 1);
    let right = right.clamp(0, width - 1);
    let top = top.clamp(0, height - 1);
    let bottom = bottom.clamp(0, height - 1);

    for y in top..=bottom {
        for x in left..=right {
            *image.get_pixel_mut(x as u32, y as u32) = color;
        }
    }
}
