use image::ImageReader;
use image_effect::crop;
use std::path::Path;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let output_dir = Path::new("tmp");
    std::fs::create_dir_all(output_dir)?;

    let img = ImageReader::open("data/test.png")?.decode()?.to_rgb8();
    let (width, height) = (img.width() as i32, img.height() as i32);

    let output = crop(&img, width / 4, height / 4, width * 3 / 4, height * 3 / 4)?;
    output.save(output_dir.join("crop_center.png"))?;
    println!("✓ Cropped to {}x{}", output.width(), output.height());

    match crop(&img, 10, 10, 5, 20) {
        Ok(_) => println!("✗ Inverted region was accepted"),
        Err(e) => println!("✓ Inverted region rejected: {e}"),
    }

    Ok(())
}
