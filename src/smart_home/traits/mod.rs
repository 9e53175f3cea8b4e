mod brightness;
mod lock_unlock;
mod on_off;
mod open_close;
mod scene;
mod temperature_setting;

pub use brightness::BrightnessTrait;
pub use lock_unlock::LockUnlockTrait;
pub use on_off::OnOffTrait;
pub use open_close::OpenCloseTrait;
pub use scene::SceneTrait;
pub use temperature_setting::TemperatureSettingTrait;
