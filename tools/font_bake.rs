use std::{env, error::Error, fs, path::PathBuf};

use warp_ui::{BakedFont, GlyphProvider, encode_png};

struct Args {
    font: PathBuf,
    output: PathBuf,
    size: f32,
    atlas: usize,
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = parse_args()?;
    let ttf = fs::read(&args.font)?;
    let (font, rgba) = BakedFont::bake(&ttf, args.size, args.atlas, args.atlas)?;
    let (w, h) = font.atlas_size();
    fs::write(&args.output, encode_png(w as u32, h as u32, &rgba)?)?;
    println!(
        "baked {} at {}px into {}x{} atlas: line advance {}, max char height {} -> {}",
        args.font.display(),
        args.size,
        w,
        h,
        font.font_size(),
        font.max_char_height(),
        args.output.display()
    );
    Ok(())
}

fn parse_args() -> Result<Args, Box<dyn Error>> {
    let mut font = None;
    let mut output = None;
    let mut size = 16.0;
    let mut atlas = 1024;
    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        let mut value = || args.next().ok_or_else(|| format!("{} requires a value", arg));
        match arg.as_str() {
            "--font" => font = Some(PathBuf::from(value()?)),
            "--output" => output = Some(PathBuf::from(value()?)),
            "--size" => size = value()?.parse()?,
            "--atlas" => atlas = value()?.parse()?,
            other => return Err(format!("unknown argument {}", other).into()),
        }
    }
    Ok(Args {
        font: font.ok_or("missing --font <path>")?,
        output: output.ok_or("missing --output <path>")?,
        size,
        atlas,
    })
}
