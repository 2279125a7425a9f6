// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use assert_cmd::prelude::*;
use image::{GenericImageView, GrayImage, RgbImage};
use predicates::prelude::*;
use seamcarver::{seamcarve, CarveConfig, Executor, PixelGrid};
use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

fn write_test_image(dir: &Path, width: u32, height: u32) -> String {
    let image = RgbImage::from_fn(width, height, |x, y| {
        image::Rgb([(x * 17 % 256) as u8, (y * 29 % 256) as u8, ((x + y) * 7 % 256) as u8])
    });
    let path = dir.join("input.png");
    image.save(&path).unwrap();
    path.to_str().unwrap().to_string()
}

fn carver() -> Command {
    Command::cargo_bin("seamcarver").unwrap()
}

#[test]
fn narrows_an_image_in_every_mode() {
    let dir = TempDir::new().unwrap();
    let input = write_test_image(dir.path(), 20, 8);
    for flag in &["", "-u", "-a"] {
        let output = dir.path().join(format!("out{}.bmp", flag));
        let mut cmd = carver();
        cmd.arg(&input).arg("5").arg("-o").arg(&output);
        if !flag.is_empty() {
            cmd.arg(flag);
        }
        cmd.assert()
            .success()
            .stdout(predicate::str::contains("Image resized"))
            .stdout(predicate::str::contains("Execution time of seam carver kernels"));
        let carved = image::open(&output).unwrap();
        assert_eq!(carved.dimensions(), (15, 8));
    }
}

#[test]
fn announces_the_selected_mode() {
    let dir = TempDir::new().unwrap();
    let input = write_test_image(dir.path(), 6, 4);
    let output = dir.path().join("out.png");
    carver()
        .arg(&input)
        .arg("2")
        .arg("--approximate")
        .arg("--output")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("approximate mode selected."));
}

#[test]
fn writes_the_removed_seams() {
    let dir = TempDir::new().unwrap();
    let input = write_test_image(dir.path(), 10, 6);
    let seams = dir.path().join("seams.txt");
    carver()
        .arg(&input)
        .arg("3")
        .arg("-j")
        .arg("0")
        .arg("-o")
        .arg(dir.path().join("out.bmp"))
        .arg("--seams-out")
        .arg(&seams)
        .assert()
        .success();
    let text = fs::read_to_string(&seams).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines.iter().all(|l| l.split(' ').count() == 6));
}

#[test]
fn rejects_a_seam_count_that_leaves_nothing() {
    let dir = TempDir::new().unwrap();
    let input = write_test_image(dir.path(), 6, 4);
    carver()
        .arg(&input)
        .arg("6")
        .arg("-o")
        .arg(dir.path().join("out.bmp"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot remove 6 seams"));
}

#[test]
fn rejects_a_seam_count_that_is_not_a_number() {
    let dir = TempDir::new().unwrap();
    let input = write_test_image(dir.path(), 6, 4);
    carver().arg(&input).arg("many").assert().failure();
}

#[test]
fn rejects_images_that_are_not_rgb() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("grey.png");
    GrayImage::from_pixel(5, 5, image::Luma([128])).save(&path).unwrap();
    carver()
        .arg(&path)
        .arg("1")
        .arg("-o")
        .arg(dir.path().join("out.bmp"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("only 3-channel RGB"));
}

#[test]
fn update_and_approximate_are_exclusive() {
    let dir = TempDir::new().unwrap();
    let input = write_test_image(dir.path(), 6, 4);
    carver()
        .arg(&input)
        .arg("1")
        .arg("-u")
        .arg("-a")
        .assert()
        .failure();
}

#[test]
fn a_missing_image_is_reported() {
    carver()
        .arg("/nonexistent/picture.png")
        .arg("1")
        .assert()
        .failure()
        .stderr(predicate::str::contains("can't load image"));
}

#[test]
fn the_saved_image_is_the_carved_grid() {
    let dir = TempDir::new().unwrap();
    let input = write_test_image(dir.path(), 16, 9);
    let output = dir.path().join("out.bmp");
    carver()
        .arg(&input)
        .arg("4")
        .arg("-j")
        .arg("0")
        .arg("-o")
        .arg(&output)
        .assert()
        .success();

    let source = image::open(&input).unwrap().to_rgb();
    let config = CarveConfig::new(4).with_executor(Executor::Sequential);
    let expected = seamcarve(PixelGrid::from_rgb_image(&source).unwrap(), config).unwrap();
    let saved = image::open(&output).unwrap().to_rgb();
    assert_eq!(saved.into_raw(), expected.to_rgb_image().into_raw());
}
