//! The root of the model
//!
//!     One `Fsm` per source file. Header directives fill in its fields; the single `%map`
//!     block becomes its map. Names the directives leave out are derived:
//!
//!         fsm file       `%fsmfile`, else `<class>_sm`
//!         fsm class      `%fsmclass`, else `<class>Context`
//!         context type   `<fsm class><<class>>`
//!         start state    `%start`, qualified with the map name when given bare

use super::map::Map;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Fsm {
    /// `%start`, as written
    pub start: Option<String>,
    /// `%class`, the user's context class
    pub class_name: Option<String>,
    /// `%fsmfile`
    pub fsmfile: Option<String>,
    /// `%fsmclass`
    pub fsmclass: Option<String>,
    pub header: Option<String>,
    pub return_type: Option<String>,
    pub packages: Vec<String>,
    /// `%include` entries, quotes removed
    pub includes: Vec<String>,
    pub imports: Vec<String>,
    pub declares: Vec<String>,
    pub access: Option<String>,
    /// Bodies of `%{ ... %}` blocks
    pub raw_code: Vec<String>,
    pub attributes: Vec<String>,
    pub package_comment: Option<String>,
    pub library_comment: Option<String>,
    pub documentation: Option<String>,
    pub source_path: Option<PathBuf>,
    pub maps: Vec<Map>,
}

impl Fsm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn map(&self) -> Option<&Map> {
        self.maps.first()
    }

    pub fn fsm_file(&self) -> Option<String> {
        self.fsmfile
            .clone()
            .or_else(|| self.class_name.as_ref().map(|class| format!("{}_sm", class)))
    }

    pub fn fsm_class(&self) -> Option<String> {
        self.fsmclass
            .clone()
            .or_else(|| self.class_name.as_ref().map(|class| format!("{}Context", class)))
    }

    /// The instantiated context template, e.g. `TurnstileContext<Turnstile>`.
    pub fn context_type(&self) -> Option<String> {
        let class = self.class_name.as_ref()?;
        Some(format!("{}<{}>", self.fsm_class()?, class))
    }

    /// `Map::State` form of the start state.
    pub fn start_state(&self) -> Option<String> {
        let start = self.start.as_ref()?;
        if start.contains("::") {
            return Some(start.clone());
        }
        match self.map() {
            Some(map) => Some(format!("{}::{}", map.name, start)),
            None => Some(start.clone()),
        }
    }

    /// Start state split into map and state name.
    pub fn start_parts(&self) -> Option<(String, String)> {
        let qualified = self.start_state()?;
        let (map, state) = qualified.split_once("::")?;
        Some((map.to_string(), state.to_string()))
    }
}
