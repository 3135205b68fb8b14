#![allow(dead_code)]
//! Shared corpus fixtures for the integration suites. The record shapes
//! mirror what the document extraction layer produces: targets carry a tag,
//! a type and an attribute map; connections carry flattened `tag`/`src`/
//! `dest` fields plus a list of links with pins and attributes.

use indufind::EntityIndex;
use serde_json::json;

pub fn target_index() -> EntityIndex {
    let mut index = EntityIndex::new();
    index.index_value(
        "T1",
        json!({
            "tag": "=A1-M2",
            "guid": "T1",
            "type": "device",
            "power": {"voltage": "24V"},
            "attributes": {"color": "red", "length": "12m"},
        }),
    );
    index.index_value(
        "T2",
        json!({
            "tag": "=A1-M3",
            "guid": "T2",
            "type": "device",
            "power": {"voltage": "230V"},
            "attributes": {"color": "blue"},
        }),
    );
    index.index_value(
        "T3",
        json!({
            "tag": "+K5-X1",
            "guid": "T3",
            "type": "strip",
            "attributes": {},
        }),
    );
    index
}

pub fn connection_index() -> EntityIndex {
    let mut index = EntityIndex::new();
    index.index_value(
        "C1",
        json!({
            "tag": "=W1",
            "src": "=A1-M2",
            "dest": "+K5-X1",
            "guid": "C1",
            "links": [
                {
                    "name": "wire-1",
                    "srcpin": "43",
                    "destpin": "44",
                    "part-number": "LLAP",
                    "attributes": [
                        {"name": "color", "value": "red"},
                        {"name": "cross-section", "value": "1.5", "unit": "mm2"},
                    ],
                },
                {
                    "name": "wire-2",
                    "srcpin": "45",
                    "destpin": "46",
                    "attributes": [
                        {"name": "color", "value": "blue"},
                    ],
                },
            ],
        }),
    );
    index.index_value(
        "C2",
        json!({
            "tag": "=W2",
            "src": "=A1-M3",
            "dest": "+K5-X1",
            "guid": "C2",
            "links": [],
        }),
    );
    index
}
