use image::ImageReader;
use image_effect::{BrightnessConfig, Effect, ImageEffect};
use std::path::Path;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let output_dir = Path::new("tmp");
    std::fs::create_dir_all(output_dir)?;

    let img = ImageReader::open("data/test.png")?.decode()?.to_rgb8();

    for level in [-300, -50, 0, 50, 300] {
        let effect = ImageEffect::Brightness(BrightnessConfig::new().with_delta(level));

        let filename = if level >= 0 {
            format!("brightness_+{}.png", level)
        } else {
            format!("brightness_{}.png", level)
        };

        let output = effect.apply(&img)?;
        output.save(output_dir.join(&filename))?;
        println!("✓ Generated {}", filename);
    }

    println!("\n✓ All brightness levels applied successfully!");
    println!("  Images saved to: tmp/");

    Ok(())
}
