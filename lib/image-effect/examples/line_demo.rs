use image::ImageReader;
use image_effect::{Effect, ImageEffect, LineConfig};
use std::path::Path;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let output_dir = Path::new("tmp");
    std::fs::create_dir_all(output_dir)?;

    let img = ImageReader::open("data/test.png")?.decode()?.to_rgb8();
    let (width, height) = (img.width() as i32, img.height() as i32);

    let lines = [
        LineConfig::new().with_end((width, height)).with_thickness(1),
        LineConfig::new()
            .with_start((0, height))
            .with_end((width, 0))
            .with_thickness(9),
        // partly outside the frame
        LineConfig::new()
            .with_start((-200, height / 2))
            .with_end((width + 200, height / 2))
            .with_thickness(5),
    ];

    let mut output = img;
    for line in lines {
        output = ImageEffect::Line(line).apply(&output)?;
    }

    output.save(output_dir.join("lines.png"))?;
    println!("✓ Lines drawn: tmp/lines.png");

    Ok(())
}
