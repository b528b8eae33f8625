use image::ImageReader;
use image_effect::{ChannelSelection, render};
use std::path::Path;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let output_dir = Path::new("tmp");
    std::fs::create_dir_all(output_dir)?;

    let img = ImageReader::open("data/test.png")?.decode()?.to_rgb8();

    let masks = [
        ("red", ChannelSelection::new(true, false, false)),
        ("green", ChannelSelection::new(false, true, false)),
        ("blue", ChannelSelection::new(false, false, true)),
        ("no_blue", ChannelSelection::new(true, true, false)),
    ];

    for (name, selection) in masks {
        let surface = render(&img, &selection);
        let output = image::RgbImage::from_raw(surface.width, surface.height, surface.pixels)
            .ok_or("surface size mismatch")?;

        let filename = format!("channels_{name}.png");
        output.save(output_dir.join(&filename))?;
        println!("✓ Generated {}", filename);
    }

    Ok(())
}
