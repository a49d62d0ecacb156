//! Normalization of a raw configuration payload.
//!
//! The configuration resource returns a cluster whose `caches` and `igfss`
//! fields hold ids, and caches whose `domains` field holds model ids.
//! Normalization swaps each id for the referenced record. Ids that do not
//! resolve are kept unchanged.

use serde_json::Value;
use std::collections::HashMap;

use crate::model::{record_id, ClusterConfiguration, ConfigurationSet, RawClusterConfiguration};

/// Builds the normalized configuration set from a raw payload.
pub fn populate(raw: RawClusterConfiguration) -> ConfigurationSet {
    let models = index_by_id(&raw.models);
    let caches: Vec<Value> = raw
        .caches
        .into_iter()
        .map(|mut cache| {
            resolve_refs(&mut cache, "domains", &models);
            cache
        })
        .collect();

    let cache_index = index_by_id(&caches);
    let igfs_index = index_by_id(&raw.igfss);

    let mut cluster = raw.cluster;
    resolve_refs(&mut cluster, "caches", &cache_index);
    resolve_refs(&mut cluster, "igfss", &igfs_index);

    tracing::debug!(
        caches = caches.len(),
        models = raw.models.len(),
        igfss = raw.igfss.len(),
        "populated cluster configuration"
    );

    ConfigurationSet {
        clusters: vec![ClusterConfiguration::new(cluster)],
        caches,
        models: raw.models,
        igfss: raw.igfss,
    }
}

fn index_by_id(records: &[Value]) -> HashMap<String, Value> {
    records
        .iter()
        .filter_map(|r| record_id(r).map(|id| (id.to_string(), r.clone())))
        .collect()
}

fn resolve_refs(record: &mut Value, field: &str, index: &HashMap<String, Value>) {
    let Some(Value::Array(items)) = record.get_mut(field) else {
        return;
    };
    for item in items.iter_mut() {
        let resolved = item.as_str().and_then(|id| index.get(id)).cloned();
        if let Some(found) = resolved {
            *item = found;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw() -> RawClusterConfiguration {
        RawClusterConfiguration {
            cluster: json!({
                "_id": "c1",
                "name": "prod",
                "caches": ["k1", "k2"],
                "igfss": ["i1"]
            }),
            caches: vec![
                json!({"_id": "k1", "name": "Person", "domains": ["m1"]}),
                json!({"_id": "k2", "name": "Org", "domains": []}),
            ],
            models: vec![json!({"_id": "m1", "valueType": "org.acme.Person"})],
            igfss: vec![json!({"_id": "i1", "name": "fs"})],
        }
    }

    #[test]
    fn resolves_cluster_and_cache_references() {
        let set = populate(raw());
        assert_eq!(set.clusters.len(), 1);
        let cluster = set.find_cluster("c1").unwrap().as_value();
        assert_eq!(cluster["caches"][0]["name"], "Person");
        assert_eq!(cluster["caches"][1]["name"], "Org");
        assert_eq!(cluster["igfss"][0]["name"], "fs");
        assert_eq!(
            cluster["caches"][0]["domains"][0]["valueType"],
            "org.acme.Person"
        );
    }

    #[test]
    fn keeps_unknown_ids() {
        let mut r = raw();
        r.cluster["caches"] = json!(["k1", "missing"]);
        let set = populate(r);
        let cluster = set.clusters[0].as_value();
        assert_eq!(cluster["caches"][1], "missing");
    }

    #[test]
    fn cluster_without_reference_fields_is_untouched() {
        let set = populate(RawClusterConfiguration {
            cluster: json!({"_id": "c9", "name": "bare"}),
            ..RawClusterConfiguration::default()
        });
        assert_eq!(
            set.clusters[0].as_value(),
            &json!({"_id": "c9", "name": "bare"})
        );
        assert!(set.caches.is_empty());
    }
}
