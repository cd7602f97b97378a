use std::fs;
use std::path::Path;

use chrono::Utc;
use idea_board::models::*;
use idea_board::{Error, IdeaService, Store};
use speculate2::speculate;

fn seeded_idea(id: &str, votes: u64) -> Idea {
    Idea {
        id: id.to_string(),
        title: "Test Idea".to_string(),
        description: String::new(),
        votes,
        notes: vec![],
        files: vec![],
        created_at: Utc::now(),
    }
}

fn attachment(name: &str) -> Attachment {
    Attachment {
        stored_name: format!("stored-{}", name),
        original_name: name.to_string(),
        size: 12,
    }
}

fn set_read_only(dir: &Path, read_only: bool) {
    let mut perms = fs::metadata(dir).expect("Failed to stat dir").permissions();
    perms.set_readonly(read_only);
    fs::set_permissions(dir, perms).expect("Failed to set permissions");
}

/// Make `dir` read-only so the next save fails. Returns false when the
/// current user can write to it anyway (e.g. root); the directory is then
/// restored and the caller has nothing to check.
fn lock_dir(dir: &Path) -> bool {
    set_read_only(dir, true);
    if tempfile::NamedTempFile::new_in(dir).is_ok() {
        set_read_only(dir, false);
        return false;
    }
    true
}

speculate! {
    before {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("ideas.json");
        let service = IdeaService::new(Store::open(&path).expect("Failed to open store"));
    }

    describe "create_idea" {
        it "creates an idea with title only" {
            let idea = service.create_idea(NewIdea::titled("Test Idea")).expect("Failed to create idea");

            assert_eq!(idea.title, "Test Idea");
            assert_eq!(idea.description, "");
            assert_eq!(idea.votes, 0);
            assert!(idea.notes.is_empty());
            assert!(idea.files.is_empty());
            assert!(!idea.id.is_empty());
        }

        it "keeps description and attachments" {
            let idea = service.create_idea(NewIdea {
                title: Some("With files".to_string()),
                description: Some("Details".to_string()),
                files: vec![attachment("a.txt"), attachment("b.png")],
            }).expect("Failed to create idea");

            assert_eq!(idea.description, "Details");
            assert_eq!(idea.files.len(), 2);
            assert_eq!(idea.files[0].original_name, "a.txt");
            assert_eq!(idea.files[1].original_name, "b.png");
        }

        it "persists the new idea" {
            let idea = service.create_idea(NewIdea::titled("Stored")).unwrap();

            let ideas = service.list_ideas();
            assert_eq!(ideas.len(), 1);
            assert_eq!(ideas[0], idea);
        }

        it "generates a unique id for every idea" {
            let mut seen = std::collections::HashSet::new();
            for n in 0..20 {
                let idea = service.create_idea(NewIdea::titled(format!("Idea {}", n))).unwrap();
                assert!(seen.insert(idea.id));
            }
            assert_eq!(service.list_ideas().len(), 20);
        }

        it "fails without a title and leaves the collection unchanged" {
            service.create_idea(NewIdea::titled("Existing")).unwrap();
            let before = std::fs::read(&path).unwrap();

            let result = service.create_idea(NewIdea {
                title: None,
                description: Some("No title provided".to_string()),
                files: vec![],
            });

            assert!(matches!(result, Err(Error::Validation(_))));
            assert_eq!(std::fs::read(&path).unwrap(), before);
        }

        it "fails with a blank title" {
            let result = service.create_idea(NewIdea::titled("   "));

            assert!(matches!(result, Err(Error::Validation(_))));
            assert!(!path.exists());
        }
    }

    describe "register_vote" {
        it "increments votes by exactly one" {
            service.store().save_all(&[seeded_idea("test-id", 5)]).unwrap();

            let idea = service.register_vote("test-id").expect("Failed to vote");
            assert_eq!(idea.votes, 6);
            assert_eq!(idea.id, "test-id");
            assert_eq!(service.list_ideas()[0].votes, 6);
        }

        it "leaves other ideas unchanged" {
            let others = vec![seeded_idea("a", 9), seeded_idea("b", 1)];
            let mut all = others.clone();
            all.push(seeded_idea("target", 3));
            service.store().save_all(&all).unwrap();

            service.register_vote("target").unwrap();

            let ideas = service.list_ideas();
            for other in &others {
                assert_eq!(ideas.iter().find(|i| i.id == other.id), Some(other));
            }
        }

        it "reports not found and leaves the file byte-for-byte unchanged" {
            service.store().save_all(&[seeded_idea("test-id", 5)]).unwrap();
            let before = std::fs::read(&path).unwrap();

            let result = service.register_vote("missing");
            assert!(matches!(result, Err(Error::NotFound(id)) if id == "missing"));
            assert_eq!(std::fs::read(&path).unwrap(), before);
        }

        it "refuses to overflow the vote counter" {
            service.store().save_all(&[seeded_idea("maxed", u64::MAX)]).unwrap();
            let before = fs::read(&path).unwrap();

            let result = service.register_vote("maxed");
            assert!(matches!(result, Err(Error::Validation(_))));
            assert_eq!(fs::read(&path).unwrap(), before);
        }

        it "does not create a file for an unknown id on an empty board" {
            let result = service.register_vote("missing");
            assert!(matches!(result, Err(Error::NotFound(_))));
            assert!(!path.exists());
        }

        it "persists in load order without re-sorting after the increment" {
            service
                .store()
                .save_all(&[seeded_idea("high", 3), seeded_idea("low", 3)])
                .unwrap();

            service.register_vote("low").unwrap();

            let raw = std::fs::read_to_string(&path).unwrap();
            let stored: Vec<Idea> = serde_json::from_str(&raw).unwrap();
            assert_eq!(stored[0].id, "high");
            assert_eq!(stored[1].id, "low");
            assert_eq!(service.list_ideas()[0].id, "low");
        }

        it "keeps every vote under concurrent callers" {
            service.store().save_all(&[seeded_idea("hot", 0)]).unwrap();

            let handles: Vec<_> = (0..8)
                .map(|_| {
                    let service = service.clone();
                    std::thread::spawn(move || {
                        for _ in 0..10 {
                            service.register_vote("hot").unwrap();
                        }
                    })
                })
                .collect();
            for handle in handles {
                handle.join().unwrap();
            }

            assert_eq!(service.list_ideas()[0].votes, 80);
        }
    }

    describe "add_note" {
        it "appends a note to the idea" {
            service.store().save_all(&[seeded_idea("test-id", 0)]).unwrap();

            let note = service.add_note("test-id", Some("hello".to_string())).expect("Failed to add note");
            assert_eq!(note.text, "hello");
            assert!(!note.id.is_empty());

            let idea = service.list_ideas().into_iter().find(|i| i.id == "test-id").unwrap();
            assert_eq!(idea.notes.len(), 1);
            assert_eq!(idea.notes.last().unwrap(), &note);
        }

        it "preserves earlier notes in order" {
            service.store().save_all(&[seeded_idea("test-id", 0)]).unwrap();

            for text in ["first", "second", "third"] {
                service.add_note("test-id", Some(text.to_string())).unwrap();
            }

            let notes: Vec<String> = service.list_ideas()[0]
                .notes
                .iter()
                .map(|n| n.text.clone())
                .collect();
            assert_eq!(notes, vec!["first", "second", "third"]);
        }

        it "reports not found and leaves the collection unchanged" {
            service.store().save_all(&[seeded_idea("test-id", 0)]).unwrap();
            let before = std::fs::read(&path).unwrap();

            let result = service.add_note("missing", Some("hello".to_string()));
            assert!(matches!(result, Err(Error::NotFound(_))));
            assert_eq!(std::fs::read(&path).unwrap(), before);
        }

        it "reports not found before checking the text" {
            service.store().save_all(&[seeded_idea("test-id", 0)]).unwrap();
            let before = fs::read(&path).unwrap();

            assert!(matches!(service.add_note("missing", None), Err(Error::NotFound(_))));
            assert!(matches!(
                service.add_note("missing", Some(" ".to_string())),
                Err(Error::NotFound(_))
            ));
            assert_eq!(fs::read(&path).unwrap(), before);
        }

        it "rejects blank text" {
            service.store().save_all(&[seeded_idea("test-id", 0)]).unwrap();
            let before = std::fs::read(&path).unwrap();

            assert!(matches!(service.add_note("test-id", None), Err(Error::Validation(_))));
            assert!(matches!(
                service.add_note("test-id", Some("  ".to_string())),
                Err(Error::Validation(_))
            ));
            assert_eq!(std::fs::read(&path).unwrap(), before);
        }
    }

    describe "list_ideas" {
        it "returns an empty list for a fresh board" {
            assert!(service.list_ideas().is_empty());
        }

        it "returns ideas most voted first" {
            service
                .store()
                .save_all(&[seeded_idea("1", 5), seeded_idea("2", 10), seeded_idea("3", 2)])
                .unwrap();

            let ids: Vec<String> = service.list_ideas().into_iter().map(|i| i.id).collect();
            assert_eq!(ids, vec!["2", "1", "3"]);
        }
    }

    describe "when saving fails" {
        it "register_vote reports the failure and leaves the file unchanged" {
            service.store().save_all(&[seeded_idea("test-id", 5)]).unwrap();
            let before = fs::read(&path).unwrap();
            if !lock_dir(dir.path()) {
                return;
            }

            let result = service.register_vote("test-id");
            set_read_only(dir.path(), false);

            assert!(matches!(result, Err(Error::Io(_))));
            assert_eq!(fs::read(&path).unwrap(), before);
            assert_eq!(service.list_ideas()[0].votes, 5);
        }

        it "add_note reports the failure and leaves the file unchanged" {
            service.store().save_all(&[seeded_idea("test-id", 0)]).unwrap();
            let before = fs::read(&path).unwrap();
            if !lock_dir(dir.path()) {
                return;
            }

            let result = service.add_note("test-id", Some("lost".to_string()));
            set_read_only(dir.path(), false);

            assert!(matches!(result, Err(Error::Io(_))));
            assert_eq!(fs::read(&path).unwrap(), before);
            assert!(service.list_ideas()[0].notes.is_empty());
        }

        it "create_idea reports the failure and leaves the file unchanged" {
            service.store().save_all(&[seeded_idea("test-id", 0)]).unwrap();
            let before = fs::read(&path).unwrap();
            if !lock_dir(dir.path()) {
                return;
            }

            let result = service.create_idea(NewIdea::titled("Never saved"));
            set_read_only(dir.path(), false);

            assert!(matches!(result, Err(Error::Io(_))));
            assert_eq!(fs::read(&path).unwrap(), before);
            assert_eq!(service.list_ideas().len(), 1);
        }
    }
}
