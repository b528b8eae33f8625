use anyhow::{Context, Result, bail};
use camera::CameraConfig;
use editor::EditorConfig;
use log::debug;
use once_cell::sync::Lazy;
use platform_dirs::AppDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf, sync::Mutex, time::Duration};

const APP_NAME: &str = env!("CARGO_PKG_NAME");
static CONFIG: Lazy<Mutex<Config>> = Lazy::new(|| Mutex::new(Config::default()));

#[derive(Serialize, Deserialize, Default, Debug, Clone)]
pub struct Config {
    #[serde(skip)]
    pub config_path: PathBuf,

    #[serde(skip)]
    pub is_first_run: bool,

    #[serde(default)]
    pub preference: Preference,

    #[serde(default)]
    pub camera: Camera,

    #[serde(default)]
    pub editor: Editor,
}

#[derive(Serialize, Deserialize, Debug, Clone, Derivative)]
#[derivative(Default)]
pub struct Preference {
    #[derivative(Default(value = "1000"))]
    pub win_width: u32,

    #[derivative(Default(value = "800"))]
    pub win_height: u32,

    /// Directory of the last opened or saved image.
    #[serde(default)]
    pub last_dir: String,
}

/// `0` leaves the device default for `fps`, `width` and `height`.
#[derive(Serialize, Deserialize, Debug, Clone, Derivative)]
#[derivative(Default)]
pub struct Camera {
    pub device_index: u32,

    #[derivative(Default(value = "100"))]
    pub interval_ms: u64,

    pub fps: u32,
    pub width: u32,
    pub height: u32,
}

#[derive(Serialize, Deserialize, Debug, Clone, Derivative)]
#[derivative(Default)]
pub struct Editor {
    #[derivative(Default(value = "10"))]
    pub brightness: i32,

    #[derivative(Default(value = "3"))]
    pub thickness: i32,
}

impl Config {
    pub fn init(&mut self) -> Result<()> {
        let app_dirs =
            AppDirs::new(Some(APP_NAME), true).with_context(|| "no config directory available")?;
        self.crate_dirs(&app_dirs)?;
        self.load().with_context(|| "load config file failed")?;
        debug!("{:?}", self);
        Ok(())
    }

    fn crate_dirs(&mut self, app_dirs: &AppDirs) -> Result<()> {
        self.config_path = app_dirs.config_dir.join(format!("{APP_NAME}.toml"));
        fs::create_dir_all(&app_dirs.config_dir)?;
        Ok(())
    }

    /// Loads `config_path`, writing the defaults when it is missing or corrupt.
    /// A corrupt file is kept next to it with a `.bak` suffix.
    fn load(&mut self) -> Result<()> {
        let text = match fs::read_to_string(&self.config_path) {
            Ok(text) => text,
            Err(_) => {
                self.is_first_run = true;
                return self.save();
            }
        };

        match toml::from_str::<Config>(&text) {
            Ok(mut c) => {
                c.config_path = self.config_path.clone();
                c.is_first_run = self.is_first_run;
                *self = c;
                Ok(())
            }
            Err(e) => {
                log::warn!("parse {} failed: {e}", self.config_path.display());
                self.is_first_run = true;

                if let Some(bak_file) = self.config_path.as_os_str().to_str() {
                    _ = fs::copy(&self.config_path, format!("{bak_file}.bak"));
                }

                self.save()
            }
        }
    }

    pub fn save(&self) -> Result<()> {
        match toml::to_string_pretty(self) {
            Ok(text) => Ok(fs::write(&self.config_path, text)
                .with_context(|| "save config failed".to_string())?),
            Err(e) => bail!(format!("convert config to toml format failed. {e:?}")),
        }
    }

    pub fn to_editor_config(&self) -> EditorConfig {
        let mut camera = CameraConfig::default();
        if self.camera.fps > 0 {
            camera = camera.with_fps(self.camera.fps);
        }
        if self.camera.width > 0 && self.camera.height > 0 {
            camera = camera
                .with_width(self.camera.width)
                .with_height(self.camera.height);
        }

        EditorConfig::default()
            .with_device_index(self.camera.device_index)
            .with_capture_interval(Duration::from_millis(self.camera.interval_ms.max(1)))
            .with_brightness(self.editor.brightness)
            .with_thickness(self.editor.thickness)
            .with_camera(camera)
    }
}

pub fn init() {
    if let Err(e) = CONFIG.lock().unwrap().init() {
        log::warn!("{e:?}. Using default config");
    }
}

pub fn all() -> Config {
    CONFIG.lock().unwrap().clone()
}

pub fn save(conf: Config) -> Result<()> {
    let mut config = CONFIG.lock().unwrap();
    *config = conf;
    config.save()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_in(dir: &tempfile::TempDir) -> Config {
        Config {
            config_path: dir.path().join("rgbshot.toml"),
            ..Default::default()
        }
    }

    #[test]
    fn test_missing_file_writes_defaults() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let mut config = config_in(&dir);

        config.load()?;
        assert!(config.is_first_run);
        assert!(config.config_path.exists());

        let saved = toml::from_str::<Config>(&fs::read_to_string(&config.config_path)?)?;
        assert_eq!(saved.camera.interval_ms, 100);
        assert_eq!(saved.editor.brightness, 10);
        assert_eq!(saved.editor.thickness, 3);
        Ok(())
    }

    #[test]
    fn test_existing_file_is_loaded() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let mut config = config_in(&dir);
        fs::write(
            &config.config_path,
            "[camera]\ndevice_index = 2\ninterval_ms = 50\nfps = 0\nwidth = 0\nheight = 0\n",
        )?;

        config.load()?;
        assert!(!config.is_first_run);
        assert_eq!(config.camera.device_index, 2);
        assert_eq!(config.camera.interval_ms, 50);
        assert_eq!(config.preference.win_width, 1000);
        assert_eq!(config.config_path, dir.path().join("rgbshot.toml"));
        Ok(())
    }

    #[test]
    fn test_corrupt_file_is_backed_up() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let mut config = config_in(&dir);
        fs::write(&config.config_path, "camera = [not toml")?;

        config.load()?;
        assert!(config.is_first_run);
        assert_eq!(
            fs::read_to_string(dir.path().join("rgbshot.toml.bak"))?,
            "camera = [not toml"
        );
        assert!(toml::from_str::<Config>(&fs::read_to_string(&config.config_path)?).is_ok());
        Ok(())
    }

    #[test]
    fn test_to_editor_config() {
        let mut config = Config::default();
        let editor_config = config.to_editor_config();
        assert_eq!(editor_config.device_index, 0);
        assert_eq!(editor_config.capture_interval, Duration::from_millis(100));
        assert_eq!(editor_config.camera.fps, None);

        config.camera.device_index = 1;
        config.camera.fps = 30;
        config.camera.width = 640;
        config.editor.thickness = 5;

        let editor_config = config.to_editor_config();
        assert_eq!(editor_config.device_index, 1);
        assert_eq!(editor_config.camera.fps, Some(30));
        assert_eq!(editor_config.camera.width, None);
        assert_eq!(editor_config.thickness, 5);
    }
}
