//! Configuration values and the store that holds them.
//!
//! The store validates everything that comes in, so the rest of the crate
//! only ever sees well-formed colors and known wheel styles. Interested parties
//! subscribe to individual fields and receive [`ConfigChange`] events over an
//! unbounded channel; a color subscriber never hears about style changes.

use futures::channel::mpsc::{UnboundedReceiver, UnboundedSender, unbounded};

use crate::{
    data_structures::{
        color::Color,
        role::{PartRole, PerRole},
    },
    error::ConfigError,
    style::WheelStyle,
};

pub const DEFAULT_BODY_COLOR: Color = Color::rgb(0x1a, 0x36, 0x5d);
pub const DEFAULT_HANDLE_COLOR: Color = Color::rgb(0x4a, 0x55, 0x68);
pub const DEFAULT_ZIPPER_COLOR: Color = Color::rgb(0xd6, 0x9e, 0x2e);
pub const DEFAULT_WHEEL_COLOR: Color = Color::rgb(0x2d, 0x37, 0x48);

/// Documented default color of a role.
pub const fn default_color(role: PartRole) -> Color {
    match role {
        PartRole::Body => DEFAULT_BODY_COLOR,
        PartRole::Handle => DEFAULT_HANDLE_COLOR,
        PartRole::Zipper => DEFAULT_ZIPPER_COLOR,
        PartRole::Wheel => DEFAULT_WHEEL_COLOR,
    }
}

/// Current look of the suitcase.
#[derive(Clone, Debug, PartialEq)]
pub struct Configuration {
    pub colors: PerRole<Color>,
    pub wheel_style: WheelStyle,
}

impl Configuration {
    pub fn color(&self, role: PartRole) -> Color {
        *self.colors.get(role)
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            colors: PerRole::from_fn(default_color),
            wheel_style: WheelStyle::default(),
        }
    }
}

/// A field of [`Configuration`] that can be subscribed to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ConfigField {
    Color(PartRole),
    WheelStyle,
}

impl ConfigField {
    pub const ALL: [ConfigField; 5] = [
        ConfigField::Color(PartRole::Body),
        ConfigField::Color(PartRole::Handle),
        ConfigField::Color(PartRole::Zipper),
        ConfigField::Color(PartRole::Wheel),
        ConfigField::WheelStyle,
    ];
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ConfigChange {
    Color(PartRole, Color),
    WheelStyle(WheelStyle),
}

impl ConfigChange {
    pub fn field(&self) -> ConfigField {
        match self {
            ConfigChange::Color(role, _) => ConfigField::Color(*role),
            ConfigChange::WheelStyle(_) => ConfigField::WheelStyle,
        }
    }
}

struct Subscriber {
    fields: Vec<ConfigField>,
    sender: UnboundedSender<ConfigChange>,
}

/// Holds the configuration, validates writes and notifies subscribers.
#[derive(Default)]
pub struct ConfigStore {
    config: Configuration,
    subscribers: Vec<Subscriber>,
}

impl std::fmt::Debug for ConfigStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigStore")
            .field("config", &self.config)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

impl ConfigStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> &Configuration {
        &self.config
    }

    /// Receive every change to any of `fields` from now on.
    pub fn subscribe(&mut self, fields: &[ConfigField]) -> UnboundedReceiver<ConfigChange> {
        let (sender, receiver) = unbounded();
        self.subscribers.push(Subscriber {
            fields: fields.to_vec(),
            sender,
        });
        receiver
    }

    pub fn set_color(&mut self, role: PartRole, hex: &str) -> Result<(), ConfigError> {
        let color = Color::from_hex(hex)?;
        *self.config.colors.get_mut(role) = color;
        self.notify(ConfigChange::Color(role, color));
        Ok(())
    }

    pub fn set_body_color(&mut self, hex: &str) -> Result<(), ConfigError> {
        self.set_color(PartRole::Body, hex)
    }

    pub fn set_handle_color(&mut self, hex: &str) -> Result<(), ConfigError> {
        self.set_color(PartRole::Handle, hex)
    }

    pub fn set_zipper_color(&mut self, hex: &str) -> Result<(), ConfigError> {
        self.set_color(PartRole::Zipper, hex)
    }

    pub fn set_wheel_color(&mut self, hex: &str) -> Result<(), ConfigError> {
        self.set_color(PartRole::Wheel, hex)
    }

    pub fn set_wheel_style(&mut self, id: &str) -> Result<(), ConfigError> {
        let style: WheelStyle = id.parse()?;
        self.config.wheel_style = style;
        self.notify(ConfigChange::WheelStyle(style));
        Ok(())
    }

    /// Restore every field to its default and notify each one.
    pub fn reset_all(&mut self) {
        self.config = Configuration::default();
        for role in PartRole::ALL {
            self.notify(ConfigChange::Color(role, default_color(role)));
        }
        self.notify(ConfigChange::WheelStyle(self.config.wheel_style));
    }

    fn notify(&mut self, change: ConfigChange) {
        let field = change.field();
        // Drop subscribers whose receiver is gone.
        self.subscribers.retain(|subscriber| {
            if !subscriber.fields.contains(&field) {
                return !subscriber.sender.is_closed();
            }
            subscriber.sender.unbounded_send(change).is_ok()
        });
    }
}
