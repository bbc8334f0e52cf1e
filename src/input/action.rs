// Binding records, device inputs and their validation

use super::ValidationError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// The four recognized device classes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceType {
    Keyboard,
    Mouse,
    Gamepad,
    Touch,
}

impl DeviceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeviceType::Keyboard => "keyboard",
            DeviceType::Mouse => "mouse",
            DeviceType::Gamepad => "gamepad",
            DeviceType::Touch => "touch",
        }
    }
}

impl fmt::Display for DeviceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeviceType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "keyboard" => Ok(DeviceType::Keyboard),
            "mouse" => Ok(DeviceType::Mouse),
            "gamepad" => Ok(DeviceType::Gamepad),
            "touch" => Ok(DeviceType::Touch),
            other => Err(ValidationError::UnknownDevice(other.to_string())),
        }
    }
}

/// Raw device-specific code as it appears in configuration: a name or a number
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InputCode {
    Name(String),
    Index(i64),
}

impl fmt::Display for InputCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputCode::Name(name) => f.write_str(name),
            InputCode::Index(index) => write!(f, "{index}"),
        }
    }
}

impl From<&str> for InputCode {
    fn from(name: &str) -> Self {
        Self::Name(name.to_string())
    }
}

impl From<i64> for InputCode {
    fn from(index: i64) -> Self {
        Self::Index(index)
    }
}

impl From<i32> for InputCode {
    fn from(index: i32) -> Self {
        Self::Index(i64::from(index))
    }
}

impl From<u32> for InputCode {
    fn from(index: u32) -> Self {
        Self::Index(i64::from(index))
    }
}

/// A discrete input on one device, carrying only the fields that device needs
///
/// Two `DeviceInput`s are equal when both the device and the code are equal,
/// which is exactly the step comparison used by the sequence matcher.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DeviceInput {
    /// Key code name, e.g. `"Space"`, `"ArrowDown"`, `"KeyP"`
    Keyboard { code: String },
    /// Button index (0 left, 1 middle, 2 right, ...)
    Mouse { button: u32 },
    /// Button index on the first connected gamepad
    Gamepad { button: u32 },
    /// Any active touch satisfies a touch input; the code is kept for matching only
    Touch { code: InputCode },
}

impl DeviceInput {
    pub fn key(code: impl Into<String>) -> Self {
        Self::Keyboard { code: code.into() }
    }

    pub fn mouse(button: u32) -> Self {
        Self::Mouse { button }
    }

    pub fn gamepad(button: u32) -> Self {
        Self::Gamepad { button }
    }

    pub fn touch(code: impl Into<InputCode>) -> Self {
        Self::Touch { code: code.into() }
    }

    /// Build and validate an input from a device name and a raw code
    pub fn from_parts(device: &str, code: &InputCode) -> Result<Self, ValidationError> {
        let device_type: DeviceType = device.parse()?;
        let invalid = || ValidationError::InvalidCode {
            device: device_type,
            code: code.to_string(),
        };

        match device_type {
            DeviceType::Keyboard => match code {
                InputCode::Name(name) if !name.is_empty() => Ok(Self::key(name.as_str())),
                _ => Err(invalid()),
            },
            DeviceType::Mouse | DeviceType::Gamepad => {
                let button = match code {
                    InputCode::Index(index) => u32::try_from(*index).map_err(|_| invalid())?,
                    InputCode::Name(name) => name.trim().parse::<u32>().map_err(|_| invalid())?,
                };
                if device_type == DeviceType::Mouse {
                    Ok(Self::mouse(button))
                } else {
                    Ok(Self::gamepad(button))
                }
            }
            DeviceType::Touch => Ok(Self::touch(code.clone())),
        }
    }

    pub fn device_type(&self) -> DeviceType {
        match self {
            DeviceInput::Keyboard { .. } => DeviceType::Keyboard,
            DeviceInput::Mouse { .. } => DeviceType::Mouse,
            DeviceInput::Gamepad { .. } => DeviceType::Gamepad,
            DeviceInput::Touch { .. } => DeviceType::Touch,
        }
    }

    /// The code converted back to its raw configuration form
    pub fn code(&self) -> InputCode {
        match self {
            DeviceInput::Keyboard { code } => InputCode::Name(code.clone()),
            DeviceInput::Mouse { button } | DeviceInput::Gamepad { button } => {
                InputCode::Index(i64::from(*button))
            }
            DeviceInput::Touch { code } => code.clone(),
        }
    }

    fn validate(&self) -> Result<(), ValidationError> {
        match self {
            DeviceInput::Keyboard { code } if code.is_empty() => {
                Err(ValidationError::InvalidCode {
                    device: DeviceType::Keyboard,
                    code: String::new(),
                })
            }
            _ => Ok(()),
        }
    }
}

impl fmt::Display for DeviceInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.device_type(), self.code())
    }
}

/// Serializable (device, code) pair, as used in sequence step lists
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputRecord {
    pub device: String,
    pub code: InputCode,
}

impl TryFrom<InputRecord> for DeviceInput {
    type Error = ValidationError;

    fn try_from(record: InputRecord) -> Result<Self, Self::Error> {
        DeviceInput::from_parts(&record.device, &record.code)
    }
}

impl From<&DeviceInput> for InputRecord {
    fn from(input: &DeviceInput) -> Self {
        Self {
            device: input.device_type().as_str().to_string(),
            code: input.code(),
        }
    }
}

/// Serializable binding record, the JSON-compatible form of a [`Binding`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BindingRecord {
    pub context: String,
    pub action: String,
    pub device: String,
    pub code: InputCode,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub modifiers: Vec<String>,
}

impl BindingRecord {
    pub fn new(
        context: impl Into<String>,
        action: impl Into<String>,
        device: impl Into<String>,
        code: impl Into<InputCode>,
    ) -> Self {
        Self {
            context: context.into(),
            action: action.into(),
            device: device.into(),
            code: code.into(),
            modifiers: Vec::new(),
        }
    }
}

/// A validated (context, action, device input) association
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    context: String,
    action: String,
    input: DeviceInput,
    modifiers: BTreeSet<String>,
}

impl Binding {
    /// Create a binding, rejecting empty context or action names
    pub fn new(
        context: impl Into<String>,
        action: impl Into<String>,
        input: DeviceInput,
    ) -> Result<Self, ValidationError> {
        let context = context.into();
        let action = action.into();

        if context.is_empty() {
            return Err(ValidationError::EmptyContext);
        }
        if action.is_empty() {
            return Err(ValidationError::EmptyAction);
        }
        input.validate()?;

        Ok(Self {
            context,
            action,
            input,
            modifiers: BTreeSet::new(),
        })
    }

    /// Require keyboard modifier keys to be held for this binding to fire
    pub fn with_modifiers<I, S>(mut self, modifiers: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for modifier in modifiers {
            let modifier = modifier.into();
            if modifier.is_empty() {
                return Err(ValidationError::EmptyModifier);
            }
            self.modifiers.insert(modifier);
        }
        Ok(self)
    }

    pub fn context(&self) -> &str {
        &self.context
    }

    pub fn action(&self) -> &str {
        &self.action
    }

    pub fn input(&self) -> &DeviceInput {
        &self.input
    }

    pub fn device_type(&self) -> DeviceType {
        self.input.device_type()
    }

    pub fn modifiers(&self) -> &BTreeSet<String> {
        &self.modifiers
    }

    /// Check the (context, action, device, code) tuple, ignoring modifiers
    pub fn same_target(&self, other: &Binding) -> bool {
        self.context == other.context && self.action == other.action && self.input == other.input
    }
}

impl TryFrom<BindingRecord> for Binding {
    type Error = ValidationError;

    fn try_from(record: BindingRecord) -> Result<Self, Self::Error> {
        let input = DeviceInput::from_parts(&record.device, &record.code)?;
        Binding::new(record.context, record.action, input)?.with_modifiers(record.modifiers)
    }
}

impl From<&Binding> for BindingRecord {
    fn from(binding: &Binding) -> Self {
        Self {
            context: binding.context.clone(),
            action: binding.action.clone(),
            device: binding.device_type().as_str().to_string(),
            code: binding.input.code(),
            modifiers: binding.modifiers.iter().cloned().collect(),
        }
    }
}
