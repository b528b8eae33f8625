#![windows_subsystem = "windows"]

fn main() -> anyhow::Result<()> {
    rgbshot::desktop_main()
}
