//! # Runner
//!
//! Issues every accessor of a client and collects the outcomes.
//!
//! Zero-argument accessors run first, all at once. The accessors that take id lists run in a
//! second round, fed with the first ids returned by the first round (contig ids for an
//! assembly, feature ids grouped by type for a genome annotation). A lookup whose ids could
//! not be fetched is skipped.
//!
//! The calls are independent: each one builds its own client triple, and within a round they
//! complete in whatever order the service answers. Outcomes are returned in declaration order.
use data_api_core::{
    Assembly, BoxError, ClientError, GenomeAnnotation, Taxon,
    client::FeatureIdFilters,
    tonic::{
        body::Body,
        client::GrpcService,
        codegen::{Body as HttpBody, Bytes},
    },
};
use futures_util::future::{FutureExt, LocalBoxFuture, join_all};
use serde::Serialize;
use serde_json::Value;
use std::future::Future;
use std::time::{Duration, Instant};

/// How many ids of a first round result are passed to the lookups.
const SAMPLE_SIZE: usize = 5;

/// Feature types whose descriptions and counts are requested.
const SAMPLE_FEATURE_TYPES: &[&str] = &[
    "crs", "gene", "loci", "trm", "pbs", "opr", "sRNA", "rna", "crispr", "pseudo", "pp", "bs",
    "locus", "prm", "att", "rsw", "mRNA", "CDS", "pi", "PEG", "trnspn",
];

/// The result of one accessor call.
#[derive(Debug)]
pub struct Outcome {
    pub method: &'static str,
    pub elapsed: Duration,
    /// `Ok(None)` when the attribute does not apply to the object.
    pub result: Result<Option<Value>, ClientError>,
}

impl Outcome {
    pub fn is_failure(&self) -> bool {
        self.result.is_err()
    }
}

async fn timed<T, F>(method: &'static str, call: F) -> Outcome
where
    T: Serialize,
    F: Future<Output = Result<Option<T>, ClientError>>,
{
    let start = Instant::now();
    let result = call.await;
    let elapsed = start.elapsed();

    tracing::debug!(method, ?elapsed, ok = result.is_ok(), "accessor finished");

    let result = result.map(|value| {
        value.map(|v| serde_json::to_value(v).unwrap_or_else(|e| Value::String(e.to_string())))
    });

    Outcome {
        method,
        elapsed,
        result,
    }
}

macro_rules! accessor_calls {
    ($client:expr; $( $method:ident $( ( $( $arg:expr ),* ) )? ),* $(,)?) => {
        {
            let calls: Vec<LocalBoxFuture<'_, Outcome>> = vec![
                $( timed(stringify!($method), $client.$method($( $( $arg ),* )?)).boxed_local(), )*
            ];
            calls
        }
    };
}

macro_rules! all_accessors {
    ($client:expr; $( $tt:tt )*) => {
        join_all(accessor_calls!($client; $( $tt )*)).await
    };
}

/// The first ids found at `pointer` in the value returned by `method`.
///
/// Empty when the call failed, returned nothing or did not hold a list of strings there.
fn sample_ids(outcomes: &[Outcome], method: &str, pointer: &str) -> Vec<String> {
    outcomes
        .iter()
        .find(|outcome| outcome.method == method)
        .and_then(|outcome| outcome.result.as_ref().ok()?.as_ref())
        .and_then(|value| value.pointer(pointer)?.as_array())
        .map(|ids| {
            ids.iter()
                .filter_map(Value::as_str)
                .take(SAMPLE_SIZE)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

pub async fn run_taxon<S>(taxon: &Taxon<S>) -> Vec<Outcome>
where
    S: GrpcService<Body>,
    S::Error: Into<BoxError>,
    S::ResponseBody: HttpBody<Data = Bytes> + Send + 'static,
    <S::ResponseBody as HttpBody>::Error: Into<BoxError> + Send,
{
    all_accessors!(taxon;
        parent,
        children,
        genome_annotations,
        scientific_lineage,
        scientific_name,
        taxonomic_id,
        kingdom,
        domain,
        genetic_code,
        aliases,
    )
}

pub async fn run_assembly<S>(assembly: &Assembly<S>) -> Vec<Outcome>
where
    S: GrpcService<Body>,
    S::Error: Into<BoxError>,
    S::ResponseBody: HttpBody<Data = Bytes> + Send + 'static,
    <S::ResponseBody as HttpBody>::Error: Into<BoxError> + Send,
{
    let mut outcomes = all_accessors!(assembly;
        assembly_id,
        genome_annotations,
        external_source_info,
        stats,
        number_contigs,
        gc_content,
        dna_size,
        contig_ids,
    );

    let contig_ids = sample_ids(&outcomes, "contig_ids", "");
    if !contig_ids.is_empty() {
        outcomes.extend(all_accessors!(assembly;
            contig_lengths(contig_ids.clone()),
            contig_gc_content(contig_ids.clone()),
            contigs(contig_ids),
        ));
    }

    outcomes
}

pub async fn run_genome_annotation<S>(annotation: &GenomeAnnotation<S>) -> Vec<Outcome>
where
    S: GrpcService<Body>,
    S::Error: Into<BoxError>,
    S::ResponseBody: HttpBody<Data = Bytes> + Send + 'static,
    <S::ResponseBody as HttpBody>::Error: Into<BoxError> + Send,
{
    let sample_types = || -> Vec<String> {
        SAMPLE_FEATURE_TYPES.iter().map(|t| t.to_string()).collect()
    };

    let mut outcomes = all_accessors!(annotation;
        taxon,
        assembly,
        feature_types,
        feature_type_descriptions(sample_types()),
        feature_type_counts(sample_types()),
        feature_ids(FeatureIdFilters::default(), "type".to_string()),
        proteins,
        summary,
    );

    let cds = sample_ids(&outcomes, "feature_ids", "/by_type/CDS");
    let genes = sample_ids(&outcomes, "feature_ids", "/by_type/gene");
    let mrnas = sample_ids(&outcomes, "feature_ids", "/by_type/mRNA");

    let mut lookups = Vec::new();
    if !cds.is_empty() {
        lookups.extend(accessor_calls!(annotation;
            features(cds.clone()),
            feature_locations(cds.clone()),
            feature_publications(cds.clone()),
            feature_dna(cds.clone()),
            feature_functions(cds.clone()),
            feature_aliases(cds.clone()),
            gene_by_cds(cds.clone()),
            mrna_by_cds(cds),
        ));
    }
    if !genes.is_empty() {
        lookups.extend(accessor_calls!(annotation;
            cds_by_gene(genes.clone()),
            mrna_by_gene(genes),
        ));
    }
    if !mrnas.is_empty() {
        lookups.extend(accessor_calls!(annotation;
            cds_by_mrna(mrnas.clone()),
            gene_by_mrna(mrnas),
        ));
    }

    outcomes.extend(join_all(lookups).await);
    outcomes
}
