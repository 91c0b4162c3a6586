//! The Assembly data client.
//!
//! The contig lookups take a list of contig ids and answer with a map keyed by contig id.
//! Ids the assembly does not know are left out of the map.
use super::{AssemblyContig, AssemblyExternalSourceInfo, AssemblyStats, data_api};
use crate::config::ObjectRef;
use std::collections::HashMap;

data_api! {
    /// A client bound to one assembly.
    client Assembly;
    /// Remote methods of the `assembly.Assembly` service.
    stub AssemblyStub;
    service "assembly.Assembly";

    /// The identifier of the assembly in its external source.
    rpc assembly_id() -> String => get_assembly_id;
    /// The genome annotations built on this assembly.
    rpc genome_annotations() -> Vec<ObjectRef> => get_genome_annotations;
    rpc external_source_info() -> AssemblyExternalSourceInfo => get_external_source_info;
    rpc stats() -> AssemblyStats => get_stats;
    rpc number_contigs() -> i64 => get_number_contigs;
    /// The GC content, as a fraction of the total DNA.
    rpc gc_content() -> f64 => get_gc_content;
    /// The total length of the DNA, in base pairs.
    rpc dna_size() -> i64 => get_dna_size;
    rpc contig_ids() -> Vec<String> => get_contig_ids;
    rpc contig_lengths(contig_id_list: Vec<String>) -> HashMap<String, i64> => get_contig_lengths;
    rpc contig_gc_content(contig_id_list: Vec<String>) -> HashMap<String, f64> => get_contig_gc_content;
    /// The full contig records, sequences included.
    rpc contigs(contig_id_list: Vec<String>) -> HashMap<String, AssemblyContig> => get_contigs;
}
