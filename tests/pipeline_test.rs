//! End-to-end batch mining over several transcripts.

use rstest::{fixture, rstest};
use tracing_subscriber::EnvFilter;

use argmine::{mine_pairs, MinerConfig, PairRecord, Relation, Transcript};

fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init();
}

fn transcript(subject: &str, body: &[&str]) -> Transcript {
    Transcript {
        subject: subject.to_string(),
        lines: body.iter().map(|s| s.to_string()).collect(),
    }
}

#[fixture]
fn corpus() -> Vec<(Transcript, String)> {
    vec![
        (
            transcript(
                "Should cats rule?",
                &[
                    "1. Should cats rule?",
                    "1.1. Pro: Cats are wise",
                    "1.1.1. Con: Cats sleep all day",
                    "1.1.1.1. Pro: Sleep sharpens the mind",
                    "1.2. Con: Cats ignore commands",
                    "1.2.1. Pro: Independence is a virtue",
                    "1.2.2. Con: Societies need cooperation",
                ],
            ),
            "pets".to_string(),
        ),
        (
            transcript(
                "Are dogs better?",
                &[
                    "1. Are dogs better?",
                    "1.1. Pro: Dogs are loyal",
                    "1.1.1. Con: Loyalty can be bought with treats",
                    "1.2. Con: Dogs are loud",
                    "1.2.1. Pro: Barking deters burglars",
                ],
            ),
            "animals".to_string(),
        ),
    ]
}

fn config() -> MinerConfig {
    MinerConfig {
        neutral_threshold: 3,
        seed: Some(42),
    }
}

#[rstest]
fn given_two_transcripts_when_mining_then_all_three_relations_present(
    corpus: Vec<(Transcript, String)>,
) {
    init_logging();
    let records = mine_pairs(&corpus, &config());

    let count = |r: Relation| records.iter().filter(|p| p.relation == r).count();
    assert!(count(Relation::Support) > 0);
    assert!(count(Relation::Attack) > 0);
    assert!(count(Relation::Neutral) > 0);
}

#[rstest]
fn given_mined_corpus_when_checking_neutrals_then_reverse_pair_law_holds(
    corpus: Vec<(Transcript, String)>,
) {
    let records = mine_pairs(&corpus, &config());

    let neutrals: Vec<&PairRecord> = records
        .iter()
        .filter(|p| p.relation == Relation::Neutral)
        .collect();
    assert!(!neutrals.is_empty());
    for record in &neutrals {
        let mirror_found = neutrals.iter().any(|r| {
            r.top_argument == record.sub_argument
                && r.sub_argument == record.top_argument
                && r.same_tree == record.same_tree
        });
        assert!(mirror_found, "no mirror for {:?}", record.top_argument);
    }
}

#[rstest]
fn given_mined_corpus_when_checking_cross_pairs_then_subjects_concatenated(
    corpus: Vec<(Transcript, String)>,
) {
    let records = mine_pairs(&corpus, &config());

    let cross: Vec<&PairRecord> = records
        .iter()
        .filter(|p| p.relation == Relation::Neutral && !p.same_tree)
        .collect();
    assert!(!cross.is_empty());
    for record in &cross {
        assert!(record.subject.contains(" & "));
        assert!(record.domain.contains(" & "));
    }
}

#[rstest]
fn given_same_seed_when_mining_twice_then_identical_output(corpus: Vec<(Transcript, String)>) {
    let first = mine_pairs(&corpus, &config());
    let second = mine_pairs(&corpus, &config());
    assert_eq!(first, second);
}

#[rstest]
fn given_malformed_transcript_in_batch_when_mining_then_others_still_mined(
    mut corpus: Vec<(Transcript, String)>,
) {
    corpus.insert(
        1,
        (
            transcript("Broken debate", &["1.1. neither stance nor sense"]),
            "junk".to_string(),
        ),
    );

    let records = mine_pairs(&corpus, &config());

    assert!(records.iter().all(|p| !p.subject.contains("Broken debate")));
    assert!(records
        .iter()
        .any(|p| p.subject.contains("Should cats rule?")));
    assert!(records
        .iter()
        .any(|p| p.subject.contains("Are dogs better?")));
    // cross-tree pairs still bridge the two valid transcripts
    assert!(records
        .iter()
        .any(|p| p.subject == "Are dogs better? & Should cats rule?"));
}

#[rstest]
fn given_edge_pairs_when_mining_then_parent_child_order_is_true(
    corpus: Vec<(Transcript, String)>,
) {
    let records = mine_pairs(&corpus, &config());

    let attacks: Vec<&PairRecord> = records
        .iter()
        .filter(|p| p.relation == Relation::Attack)
        .collect();
    assert!(attacks
        .iter()
        .any(|p| p.top_argument == "Cats are wise" && p.sub_argument == "Cats sleep all day"));
    let supports: Vec<&PairRecord> = records
        .iter()
        .filter(|p| p.relation == Relation::Support)
        .collect();
    assert!(supports.iter().any(|p| {
        p.top_argument == "Cats sleep all day" && p.sub_argument == "Sleep sharpens the mind"
    }));
}
