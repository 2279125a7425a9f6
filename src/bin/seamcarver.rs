// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use seamcarver::{CarveConfig, Executor, Mode, PixelGrid, Seam, SeamCarver, SeamError};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::process;
use std::time::Instant;

extern crate clap;
extern crate image;

use clap::{value_t, App, Arg, ArgGroup, ArgMatches};
use failure::{Error, ResultExt};
use image::ColorType;
use itertools::Itertools;

fn channel_count(color: ColorType) -> usize {
    match color {
        ColorType::RGB(_) | ColorType::BGR(_) => 3,
        ColorType::RGBA(_) | ColorType::BGRA(_) => 4,
        ColorType::GrayA(_) => 2,
        _ => 1,
    }
}

fn mode_of(matches: &ArgMatches) -> Mode {
    if matches.is_present("update") {
        Mode::Update
    } else if matches.is_present("approximate") {
        Mode::Approximate
    } else {
        Mode::Standard
    }
}

fn write_seams(path: &str, seams: &[Seam]) -> Result<(), Error> {
    let mut out = BufWriter::new(
        File::create(path).with_context(|_| format!("can't create \"{}\"", path))?,
    );
    for seam in seams {
        writeln!(out, "{}", seam.columns().iter().join(" "))?;
    }
    Ok(())
}

fn run() -> Result<(), Error> {
    let matches = App::new("seamcarver")
        .version("0.1.0")
        .author("Elf M. Sternberg <elf.sternberg@gmail.com>")
        .about("Content-aware image narrowing by seam carving")
        .arg(
            Arg::with_name("image")
                .help("The image to narrow")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::with_name("seams")
                .help("The number of vertical seams to remove")
                .required(true)
                .index(2),
        )
        .arg(
            Arg::with_name("update")
                .short("u")
                .long("update")
                .help("Update costs around each seam instead of recomputing them"),
        )
        .arg(
            Arg::with_name("approximate")
                .short("a")
                .long("approximate")
                .help("Approximate each seam with greedy chains"),
        )
        .group(ArgGroup::with_name("mode").args(&["update", "approximate"]))
        .arg(
            Arg::with_name("output")
                .short("o")
                .long("output")
                .takes_value(true)
                .default_value("resized.bmp")
                .help("Where to write the narrowed image"),
        )
        .arg(
            Arg::with_name("threads")
                .short("j")
                .long("threads")
                .takes_value(true)
                .help("Compute lanes to use; 0 runs everything on one thread"),
        )
        .arg(
            Arg::with_name("seams-out")
                .long("seams-out")
                .takes_value(true)
                .help("Also write every removed seam, one line of columns per seam"),
        )
        .get_matches();

    let seams = value_t!(matches, "seams", usize).unwrap_or_else(|e| e.exit());
    let executor = if matches.is_present("threads") {
        Executor::with_lanes(value_t!(matches, "threads", usize).unwrap_or_else(|e| e.exit()))
    } else {
        Executor::default()
    };
    let mode = mode_of(&matches);
    if mode != Mode::Standard {
        println!("{} mode selected.", mode);
    }

    let path = matches.value_of("image").unwrap_or_default();
    let decoded = image::open(path).with_context(|_| format!("can't load image \"{}\"", path))?;
    let channels = channel_count(decoded.color());
    if channels != seamcarver::pixelgrid::CHANNELS {
        return Err(SeamError::InvalidChannels { channels }.into());
    }
    let grid = PixelGrid::from_rgb_image(&decoded.to_rgb())?;

    println!("Image loaded. Resizing...");
    let config = CarveConfig::new(seams)
        .with_mode(mode)
        .with_executor(executor);
    let mut carver = SeamCarver::new(grid, config)?;

    let started = Instant::now();
    let mut removed = Vec::with_capacity(seams);
    while !carver.is_done() {
        removed.push(carver.step()?);
    }
    println!(
        "Execution time of seam carver kernels: {:.3} (ms)",
        started.elapsed().as_secs_f64() * 1e3
    );
    println!("Image resized");

    if let Some(seams_out) = matches.value_of("seams-out") {
        write_seams(seams_out, &removed)?;
    }

    let output = matches.value_of("output").unwrap_or("resized.bmp");
    println!("Saving in {}...", output);
    carver
        .grid()
        .to_rgb_image()
        .save(output)
        .with_context(|_| format!("can't save \"{}\"", output))?;
    println!("Success");
    Ok(())
}

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("seamcarver: {}", err.iter_chain().join(": "));
        process::exit(1);
    }
}
