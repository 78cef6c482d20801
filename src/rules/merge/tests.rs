use crate::config::{MergeConfig, MergeSteps};
use crate::engine::MergeRule;
use crate::fixtures;
use crate::labels::{Dep, DepSet, Pos, PosSet};
use crate::rules::merge::rules;
use crate::tree::SentenceTree;

fn all_fixtures() -> Vec<(&'static str, SentenceTree)> {
    vec![
        ("apple_tree", fixtures::apple_tree()),
        ("apple_tree_appos", fixtures::apple_tree_appos()),
        ("tom_tennis", fixtures::tom_tennis()),
        ("industrial_revolution", fixtures::industrial_revolution()),
        ("soldier_from_manchester", fixtures::soldier_from_manchester()),
        ("soldier_walk", fixtures::soldier_walk()),
        ("soldier_pub", fixtures::soldier_pub()),
        ("think_go", fixtures::think_go()),
        ("wants_to_leave", fixtures::wants_to_leave()),
        ("dated", fixtures::dated()),
        ("marked_math", fixtures::marked_math()),
    ]
}

fn all_rules() -> Vec<MergeRule> {
    vec![
        rules::rule_compound_nouns(),
        rules::rule_phrases(PosSet::empty()),
        rules::rule_phrases(PosSet::DET),
        rules::rule_prepositions(),
        rules::rule_punct(),
        rules::rule_noun_conjs(),
        rules::rule_appos(DepSet::APPOS),
        rules::rule_verbs(),
        rules::rule_dates(),
        rules::rule_math_markers(),
    ]
}

fn run(rule: MergeRule, tree: &SentenceTree) -> SentenceTree {
    rule.apply(tree).0
}

fn texts(tree: &SentenceTree) -> Vec<String> {
    tree.iter().map(|t| t.text().to_string()).collect()
}

#[test]
fn merge_scenarios() {
    // (fixture, rule, tokens after, merged position, merged text, label)
    let cases: Vec<(SentenceTree, MergeRule, usize, usize, &str, Dep)> = vec![
        (fixtures::apple_tree(), rules::rule_prepositions(), 9, 4, "apple of the apple tree", Dep::Nsubjpass),
        (fixtures::apple_tree(), rules::rule_compound_nouns(), 12, 7, "apple tree", Dep::Pobj),
        (fixtures::apple_tree(), rules::rule_phrases(PosSet::empty()), 7, 0, "The blue, red apple", Dep::Nsubjpass),
        (fixtures::apple_tree(), rules::rule_phrases(PosSet::DET), 9, 1, "blue, red apple", Dep::Nsubjpass),
        (fixtures::apple_tree(), rules::rule_punct(), 11, 1, "blue,", Dep::Amod),
        (fixtures::apple_tree(), rules::rule_verbs(), 11, 9, "has been fallen", Dep::Root),
        (fixtures::apple_tree_appos(), rules::rule_appos(DepSet::APPOS), 13, 8, "tree, Martas tree,", Dep::Appos),
        (fixtures::soldier_walk(), rules::rule_noun_conjs(), 11, 1, "soldier and the teacher", Dep::Nsubj),
        (fixtures::dated(), rules::rule_dates(), 5, 3, "03 11 2024", Dep::Pobj),
        (fixtures::marked_math(), rules::rule_math_markers(), 5, 1, "¦ x + y ¦", Dep::Nsubj),
    ];

    for (tree, rule, len, position, text, dep) in cases {
        let name = rule.name;
        let merged = run(rule, &tree);
        assert_eq!(merged.len(), len, "{name}: {:?}", texts(&merged));
        let token = merged.at(position);
        assert_eq!(token.text(), text, "{name}");
        assert_eq!(token.dep(), dep, "{name}");
    }
}

#[test]
fn prepositions_keep_the_root() {
    let merged = run(rules::rule_prepositions(), &fixtures::apple_tree());
    assert_eq!(merged.root().text(), "fallen");
    let subject = merged.root().children().find(|c| c.dep() == Dep::Nsubjpass).unwrap();
    assert_eq!(subject.text(), "apple of the apple tree");
    assert_eq!(subject.pos(), Pos::Noun);
}

#[test]
fn appositive_hangs_under_its_noun() {
    let merged = run(rules::rule_appos(DepSet::APPOS), &fixtures::apple_tree_appos());
    let appos = merged.at(8);
    assert_eq!(appos.head().text(), "apple");
    assert_eq!(merged.root().text(), "fallen");
    assert_eq!(merged.text(), fixtures::apple_tree_appos().text());
}

#[test]
fn appositive_labels_are_configurable() {
    let tree = fixtures::apple_tree_appos();
    assert_eq!(run(rules::rule_appos(DepSet::empty()), &tree), tree);
    assert_eq!(run(rules::rule_appos(DepSet::NPADVMOD), &tree), tree);
}

#[test]
fn punctuation_keeps_the_word_attributes() {
    let merged = run(rules::rule_punct(), &fixtures::apple_tree());
    let fallen = merged.root();
    assert_eq!(fallen.text(), "fallen.");
    assert_eq!(fallen.pos(), Pos::Verb);
    assert_eq!(merged.at(1).pos(), Pos::Adj);
}

#[test]
fn phrase_heads_give_the_attributes() {
    let merged = run(rules::rule_phrases(PosSet::empty()), &fixtures::apple_tree());
    assert_eq!(texts(&merged), ["The blue, red apple", "of", "the apple tree", "has", "been", "fallen", "."]);
    assert_eq!(merged.at(0).pos(), Pos::Noun);
    assert_eq!(merged.at(2).token().lemma, "tree");
}

#[test]
fn date_needs_three_number_tokens() {
    let tree = fixtures::tom_tennis();
    assert_eq!(run(rules::rule_dates(), &tree), tree);
}

#[test]
fn single_rules_are_idempotent() {
    let idempotent = || {
        vec![
            rules::rule_compound_nouns(),
            rules::rule_phrases(PosSet::empty()),
            rules::rule_phrases(PosSet::DET),
            rules::rule_punct(),
            rules::rule_noun_conjs(),
            rules::rule_appos(DepSet::APPOS),
            rules::rule_verbs(),
            rules::rule_dates(),
            rules::rule_math_markers(),
        ]
    };
    for (name, tree) in all_fixtures() {
        for (first, second) in idempotent().into_iter().zip(idempotent()) {
            let rule = first.name;
            let once = run(first, &tree);
            let twice = run(second, &once);
            assert_eq!(once, twice, "{rule} on {name}");
        }
    }
}

#[test]
fn appositive_merge_is_stable() {
    let once = run(rules::rule_appos(DepSet::APPOS), &fixtures::apple_tree_appos());
    let twice = run(rules::rule_appos(DepSet::APPOS), &once);
    assert_eq!(texts(&twice), texts(&once));
    assert_eq!(twice.at(5).text(), "of");
    assert_eq!(twice.at(8).text(), "tree, Martas tree,");
}

#[test]
fn chained_of_phrases_settle_after_two_passes() {
    let tree = fixtures::industrial_revolution();
    let once = run(rules::rule_prepositions(), &tree);
    let texts_once = texts(&once);
    assert!(texts_once.contains(&"period of global transition".to_string()), "{texts_once:?}");
    assert!(texts_once.contains(&"economy".to_string()), "{texts_once:?}");

    let twice = run(rules::rule_prepositions(), &once);
    assert!(texts(&twice).contains(&"period of global transition of human economy".to_string()));

    for (name, tree) in all_fixtures() {
        let twice = run(rules::rule_prepositions(), &run(rules::rule_prepositions(), &tree));
        let thrice = run(rules::rule_prepositions(), &twice);
        assert_eq!(thrice, twice, "{name}");
    }
}

#[test]
fn merges_preserve_tree_invariants() {
    for (name, tree) in all_fixtures() {
        for rule in all_rules() {
            let rule_name = rule.name;
            let merged = run(rule, &tree);
            assert!(merged.len() <= tree.len(), "{rule_name} on {name}");
            assert_eq!(merged.text(), tree.text(), "{rule_name} on {name}");
            let rebuilt = SentenceTree::new(merged.tokens().to_vec());
            assert_eq!(rebuilt.as_ref(), Ok(&merged), "{rule_name} on {name}");
        }
    }
}

#[test]
fn full_pass_over_a_long_sentence() {
    let tree = fixtures::industrial_revolution();
    let merged = rules::get(&MergeConfig::default()).run(&tree);
    assert_eq!(merged.len(), 34);
    assert_eq!(merged.root().text(), "was");
    assert_eq!(merged.root().i(), 7);

    let expected = [
        (0, "The Industrial Revolution"),
        (5, "the First Industrial Revolution"),
        (8, "a period of global transition of human economy"),
        (10, "more widespread, efficient and stable manufacturing processes"),
        (13, "the Agricultural Revolution"),
        (17, "Great Britain"),
        (19, "continental Europe"),
        (21, "the United States"),
        (26, "the period"),
    ];
    for (position, text) in expected {
        assert_eq!(merged.at(position).text(), text);
    }
    assert_eq!(merged.at(8).dep(), Dep::Attr);
    assert_eq!(merged.text(), tree.text());
}

#[test]
fn steps_follow_the_config() {
    let names: Vec<_> = rules::get(&MergeConfig::default()).steps().collect();
    assert_eq!(names, ["compound nouns", "noun phrases", "of prepositions", "of prepositions", "appositives"]);

    let config = MergeConfig { steps: MergeSteps::all(), ..MergeConfig::default() };
    let names: Vec<_> = rules::get(&config).steps().collect();
    assert_eq!(
        names,
        [
            "compound nouns",
            "noun phrases",
            "of prepositions",
            "of prepositions",
            "punctuation",
            "noun conjunctions",
            "appositives"
        ]
    );

    let config = MergeConfig { steps: MergeSteps::empty(), ..MergeConfig::default() };
    let tree = fixtures::apple_tree();
    assert_eq!(rules::get(&config).run(&tree), tree);
}

#[test]
fn trigger_scan_skips_rules_without_their_labels() {
    let (_, step) = rules::rule_appos(DepSet::APPOS).apply(&fixtures::tom_tennis());
    assert!(step.skipped);
    let (_, step) = rules::rule_math_markers().apply(&fixtures::apple_tree());
    assert!(step.skipped);
    let (_, step) = rules::rule_compound_nouns().apply(&fixtures::apple_tree());
    assert!(!step.skipped);
    assert_eq!((step.candidates, step.accepted, step.tokens_before, step.tokens_after), (1, 1, 13, 12));
}
