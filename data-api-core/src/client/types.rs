//! Records exchanged with the data services.
//!
//! The services may omit any field they have no value for, so every record defaults its
//! missing fields when it is deserialized.
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Summary statistics of an assembly.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssemblyStats {
    pub num_contigs: i64,
    pub dna_size: i64,
    pub gc_content: f64,
}

/// Where an assembly was imported from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssemblyExternalSourceInfo {
    pub external_source: String,
    pub external_source_id: String,
    pub external_source_origination_date: String,
}

/// A single contig of an assembly.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssemblyContig {
    pub contig_id: String,
    pub sequence: String,
    pub length: i64,
    pub md5: String,
    pub name: String,
    pub description: String,
    pub is_complete: bool,
    pub is_circular: bool,
}

/// A stretch of a contig. `strand` is `+` or `-`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Region {
    pub contig_id: String,
    pub strand: String,
    pub start: i64,
    pub length: i64,
}

/// Filters for [`crate::GenomeAnnotation::feature_ids`]. Empty lists do not filter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureIdFilters {
    pub type_list: Vec<String>,
    pub region_list: Vec<Region>,
    pub function_list: Vec<String>,
    pub alias_list: Vec<String>,
}

/// Feature ids grouped by the filter that selected them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureIdMapping {
    pub by_type: HashMap<String, Vec<String>>,
    /// contig id -> strand -> range -> feature ids
    pub by_region: HashMap<String, HashMap<String, HashMap<String, Vec<String>>>>,
    pub by_function: HashMap<String, Vec<String>>,
    pub by_alias: HashMap<String, Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureData {
    pub feature_id: String,
    pub feature_type: String,
    pub feature_function: String,
    pub feature_aliases: HashMap<String, Vec<String>>,
    pub feature_dna_sequence_length: i64,
    pub feature_dna_sequence: String,
    pub feature_md5: String,
    pub feature_locations: Vec<Region>,
    pub feature_publications: Vec<String>,
    pub feature_quality_warnings: Vec<String>,
    pub feature_quality_score: Vec<String>,
    pub feature_notes: String,
    pub feature_inference: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProteinData {
    pub protein_id: String,
    pub protein_amino_acid_sequence: String,
    pub protein_function: String,
    pub protein_aliases: Vec<String>,
    pub protein_md5: String,
    pub protein_domain_locations: Vec<String>,
}

/// The precomputed summary of a genome annotation, its taxon and its assembly.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenomeAnnotationSummary {
    pub scientific_name: String,
    pub taxonomy_id: i64,
    pub kingdom: String,
    pub scientific_lineage: Vec<String>,
    pub genetic_code: i64,
    pub organism_aliases: Vec<String>,
    pub assembly_source: String,
    pub assembly_source_id: String,
    pub assembly_source_date: String,
    pub gc_content: f64,
    pub dna_size: i64,
    pub num_contigs: i64,
    pub contig_ids: Vec<String>,
    pub external_source: String,
    pub external_source_date: String,
    pub release: String,
    pub original_source_filename: String,
    pub feature_type_counts: HashMap<String, i64>,
}
