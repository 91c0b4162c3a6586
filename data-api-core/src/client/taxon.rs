//! The Taxon data client.
use super::data_api;
use crate::config::ObjectRef;

data_api! {
    /// A client bound to one taxon.
    client Taxon;
    /// Remote methods of the `taxon.Taxon` service.
    stub TaxonStub;
    service "taxon.Taxon";

    /// The parent taxon, `None` for the root of the taxonomy.
    rpc parent() -> ObjectRef => get_parent;
    /// The direct children of this taxon.
    rpc children() -> Vec<ObjectRef> => get_children;
    /// The genome annotations of organisms in this taxon.
    rpc genome_annotations() -> Vec<ObjectRef> => get_genome_annotations;
    /// The lineage, from the root of the taxonomy down to this taxon.
    rpc scientific_lineage() -> Vec<String> => get_scientific_lineage;
    rpc scientific_name() -> String => get_scientific_name;
    /// The NCBI taxonomic id.
    rpc taxonomic_id() -> i64 => get_taxonomic_id;
    rpc kingdom() -> String => get_kingdom;
    rpc domain() -> String => get_domain;
    rpc genetic_code() -> i64 => get_genetic_code;
    rpc aliases() -> Vec<String> => get_aliases;
}
