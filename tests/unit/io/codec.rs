use std::path::PathBuf;

use super::*;
use crate::foundation::core::Rgba8;

fn png_bytes(img: image::RgbaImage) -> Vec<u8> {
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

#[test]
fn decode_png_keeps_straight_alpha() {
    let img = image::RgbaImage::from_raw(1, 1, vec![100, 50, 200, 128]).unwrap();
    let decoded = decode_tileset(&png_bytes(img)).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (1, 1));
    assert_eq!(decoded.data(), &[100, 50, 200, 128]);
}

#[test]
fn decode_garbage_is_an_error() {
    assert!(matches!(
        decode_tileset(b"definitely not an image"),
        Err(crate::ExtrudeError::Other(_))
    ));
}

#[test]
fn encode_png_is_lossless() {
    let img = image::RgbaImage::from_fn(3, 2, |x, y| image::Rgba([x as u8, y as u8, 7, 9]));
    let buffer = PixelBuffer::from_rgba_image(img).unwrap();

    let bytes = encode_tileset(&buffer, image::ImageFormat::Png).unwrap();
    assert_eq!(guess_format(&bytes), Some(image::ImageFormat::Png));
    assert_eq!(decode_tileset(&bytes).unwrap(), buffer);
}

#[test]
fn encode_jpeg_drops_alpha() {
    let buffer = PixelBuffer::filled(8, 8, Rgba8::new(200, 10, 10, 0)).unwrap();
    let bytes = encode_tileset(&buffer, image::ImageFormat::Jpeg).unwrap();
    assert_eq!(guess_format(&bytes), Some(image::ImageFormat::Jpeg));
    let decoded = decode_tileset(&bytes).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (8, 8));
    assert_eq!(decoded.pixel(0, 0).map(|c| c.a), Some(255));
}

#[test]
fn save_and_load_through_nested_dirs() {
    let dir = PathBuf::from("target").join("unit_codec").join("nested");
    let _ = std::fs::remove_dir_all(&dir);
    let path = dir.join("tiles.png");

    let buffer = PixelBuffer::filled(4, 2, Rgba8::new(1, 2, 3, 4)).unwrap();
    save_tileset(&buffer, &path).unwrap();
    assert_eq!(load_tileset(&path).unwrap(), buffer);
}

#[test]
fn save_with_unknown_extension_fails() {
    let buffer = PixelBuffer::filled(1, 1, Rgba8::TRANSPARENT_WHITE).unwrap();
    let path = PathBuf::from("target").join("unit_codec").join("tiles.nope");
    assert!(save_tileset(&buffer, &path).is_err());
}

#[test]
fn load_missing_file_mentions_path() {
    let err = load_tileset("target/unit_codec/missing.png").unwrap_err();
    assert!(format!("{err:#}").contains("missing.png"));
}

#[test]
fn load_undecodable_file_mentions_path() {
    let dir = PathBuf::from("target").join("unit_codec");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("garbage.png");
    std::fs::write(&path, b"not a png").unwrap();

    let err = load_tileset(&path).unwrap_err();
    let msg = format!("{err:#}");
    assert!(msg.contains("decode tileset image"), "{msg}");
    assert!(msg.contains("garbage.png"), "{msg}");
}
