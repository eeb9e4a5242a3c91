// Copyright 2025 John Brosnihan
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//! Integration tests for kind-indexed lookup

use altng::ecs::{Classifier, Kind, COMPONENT, GLOBAL_COMPONENT};
use altng::EngineError;

static VEHICLE: Kind = Kind::derived("Vehicle", &COMPONENT);
static CAR: Kind = Kind::derived("Car", &VEHICLE);
static RACER: Kind = Kind::derived("Racer", &CAR);
static BOAT: Kind = Kind::derived("Boat", &VEHICLE);
static TRUCK: Kind = Kind::derived("Truck", &VEHICLE);
static FOREIGN: Kind = Kind::root("Foreign");

fn fleet() -> Classifier<u32> {
    let mut classifier = Classifier::new(&COMPONENT);
    classifier.register(&RACER, 1).unwrap();
    classifier.register(&BOAT, 2).unwrap();
    classifier.register(&CAR, 3).unwrap();
    classifier.register(&RACER, 4).unwrap();
    classifier.register(&VEHICLE, 5).unwrap();
    classifier
}

#[test]
fn test_three_level_queries() {
    let classifier = fleet();

    assert_eq!(classifier.query_all(&VEHICLE), vec![5, 3, 1, 4, 2]);
    assert_eq!(classifier.query_all(&CAR), vec![3, 1, 4]);
    assert_eq!(classifier.query_all(&RACER), vec![1, 4]);
    assert_eq!(classifier.query_exact(&CAR), &[3]);
    assert_eq!(classifier.count(&VEHICLE), 5);
    assert_eq!(classifier.len(), 5);
}

#[test]
fn test_kind_without_instances_is_empty() {
    let classifier = fleet();
    assert!(classifier.query_all(&TRUCK).is_empty());
    assert!(classifier.query_exact(&TRUCK).is_empty());
    assert_eq!(classifier.count(&TRUCK), 0);
    assert_eq!(
        classifier.query_unique(&TRUCK),
        Err(EngineError::NoInstance { kind: "Truck" })
    );
}

#[test]
fn test_unique_lookup() {
    let classifier = fleet();
    assert_eq!(classifier.query_unique(&BOAT), Ok(2));
    assert_eq!(
        classifier.query_unique(&RACER),
        Err(EngineError::AmbiguousInstance {
            kind: "Racer",
            count: 2
        })
    );
}

#[test]
fn test_kind_tree_in_first_seen_order() {
    let classifier = fleet();
    let names = |kinds: Vec<&'static Kind>| kinds.iter().map(|k| k.name()).collect::<Vec<_>>();

    assert_eq!(names(classifier.child_kinds(&VEHICLE)), vec!["Car", "Boat"]);
    assert_eq!(
        names(classifier.descendant_kinds(&VEHICLE)),
        vec!["Vehicle", "Car", "Racer", "Boat"]
    );
}

#[test]
fn test_foreign_kind_rejected() {
    let mut classifier = Classifier::new(&GLOBAL_COMPONENT);
    assert!(matches!(
        classifier.register(&FOREIGN, 1),
        Err(EngineError::NotADescendant { .. })
    ));
    assert!(matches!(
        classifier.register(&VEHICLE, 1),
        Err(EngineError::NotADescendant { .. })
    ));
    assert!(classifier.is_empty());
}

#[test]
fn test_purge_keeps_kind_order() {
    let mut classifier = fleet();
    classifier.purge(|id| *id % 2 == 1);
    assert_eq!(classifier.query_all(&VEHICLE), vec![4, 2]);

    classifier.register(&CAR, 6).unwrap();
    assert_eq!(classifier.query_all(&VEHICLE), vec![6, 4, 2]);
}
