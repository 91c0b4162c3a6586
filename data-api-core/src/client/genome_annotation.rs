//! The GenomeAnnotation data client.
//!
//! Most lookups take a list of feature ids and answer with a map keyed by feature id. The
//! `*_by_*` lookups translate between the ids of related genes, mRNAs and CDSs.
use super::{
    FeatureData, FeatureIdFilters, FeatureIdMapping, GenomeAnnotationSummary, ProteinData, Region,
    data_api,
};
use crate::config::ObjectRef;
use std::collections::HashMap;

data_api! {
    /// A client bound to one genome annotation.
    client GenomeAnnotation;
    /// Remote methods of the `genome_annotation.GenomeAnnotation` service.
    stub GenomeAnnotationStub;
    service "genome_annotation.GenomeAnnotation";

    /// The taxon of the annotated organism.
    rpc taxon() -> ObjectRef => get_taxon;
    /// The assembly the annotation is built on.
    rpc assembly() -> ObjectRef => get_assembly;
    rpc feature_types() -> Vec<String> => get_feature_types;
    rpc feature_type_descriptions(feature_type_list: Vec<String>) -> HashMap<String, String> => get_feature_type_descriptions;
    rpc feature_type_counts(feature_type_list: Vec<String>) -> HashMap<String, i64> => get_feature_type_counts;
    /// Feature ids, optionally filtered by type, region, function and alias.
    ///
    /// `group_type` selects which grouping of the answer the service fills in.
    rpc feature_ids(filters: FeatureIdFilters, group_type: String) -> FeatureIdMapping => get_feature_ids;
    rpc features(feature_id_list: Vec<String>) -> HashMap<String, FeatureData> => get_features;
    /// Every protein of the annotation, keyed by protein id.
    rpc proteins() -> HashMap<String, ProteinData> => get_proteins;
    rpc feature_locations(feature_id_list: Vec<String>) -> HashMap<String, Vec<Region>> => get_feature_locations;
    rpc feature_publications(feature_id_list: Vec<String>) -> HashMap<String, Vec<String>> => get_feature_publications;
    rpc feature_dna(feature_id_list: Vec<String>) -> HashMap<String, String> => get_feature_dna;
    rpc feature_functions(feature_id_list: Vec<String>) -> HashMap<String, String> => get_feature_functions;
    rpc feature_aliases(feature_id_list: Vec<String>) -> HashMap<String, Vec<String>> => get_feature_aliases;
    /// The CDS ids of each gene.
    rpc cds_by_gene(gene_id_list: Vec<String>) -> HashMap<String, Vec<String>> => get_cds_by_gene;
    rpc cds_by_mrna(mrna_id_list: Vec<String>) -> HashMap<String, String> => get_cds_by_mrna;
    rpc gene_by_cds(cds_id_list: Vec<String>) -> HashMap<String, String> => get_gene_by_cds;
    rpc gene_by_mrna(mrna_id_list: Vec<String>) -> HashMap<String, String> => get_gene_by_mrna;
    rpc mrna_by_cds(cds_id_list: Vec<String>) -> HashMap<String, String> => get_mrna_by_cds;
    /// The mRNA ids of each gene.
    rpc mrna_by_gene(gene_id_list: Vec<String>) -> HashMap<String, Vec<String>> => get_mrna_by_gene;
    rpc summary() -> GenomeAnnotationSummary => get_summary;
}
