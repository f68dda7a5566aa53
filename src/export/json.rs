//! JSON serialization of the model.
//!
//! Layout:
//!
//! ```json
//! {"W06000023": {"names": {"cym": "Powys", "eng": "Powys"},
//!                "measures": {"pop": {"2019": 132447.0, "2020": 133030.0}}}}
//! ```
//!
//! Keys are emitted in sorted order. An empty store and an empty measure both serialize to `{}`.

use std::collections::BTreeMap;

use serde::ser::{Serialize, SerializeStruct, Serializer};
use serde::Deserialize;

use crate::error::StatsResult;
use crate::model::{Area, AreaStore, Measure};

impl Serialize for Measure {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.readings())
    }
}

impl Serialize for Area {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Area", 2)?;
        state.serialize_field("names", self.names())?;
        state.serialize_field("measures", self.measures())?;
        state.end()
    }
}

impl Serialize for AreaStore {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter().map(|area| (area.code(), area)))
    }
}

impl Measure {
    /// `{"<year>": <value>, ...}`.
    pub fn to_json(&self) -> StatsResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}

impl Area {
    /// `{"names": {...}, "measures": {...}}`.
    pub fn to_json(&self) -> StatsResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}

#[derive(Deserialize)]
struct AreaDoc {
    #[serde(default)]
    names: BTreeMap<String, String>,
    #[serde(default)]
    measures: BTreeMap<String, BTreeMap<u32, f64>>,
}

impl AreaStore {
    /// Compact JSON for the whole store.
    pub fn to_json(&self) -> StatsResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Indented JSON for the whole store.
    pub fn to_json_pretty(&self) -> StatsResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Rebuild a store from the output of [`Self::to_json`].
    ///
    /// Labels are not part of the export, so every measure gets its codename as label.
    pub fn from_json(input: &str) -> StatsResult<Self> {
        let docs: BTreeMap<String, AreaDoc> = serde_json::from_str(input)?;
        let mut store = AreaStore::new();
        for (code, doc) in docs {
            let mut area = Area::new(code.as_str());
            for (lang, name) in doc.names {
                area.set_name(&lang, name)?;
            }
            for (codename, readings) in doc.measures {
                let mut measure = Measure::new(&codename, codename.as_str());
                for (year, value) in readings {
                    measure.set_value(year, value);
                }
                area.set_measure(&codename, measure);
            }
            store.set_area(&code, area);
        }
        Ok(store)
    }
}
