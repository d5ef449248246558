//! End-to-end runs of the engine against a file-backed preference store and a
//! real seed worker thread.

use std::time::Duration;

use tempfile::TempDir;
use userdesk::app::{Screen, DUPLICATE_EMAIL_NOTICE};
use userdesk::source::JsonFileSource;
use userdesk::storage::JsonKeyValueStore;
use userdesk::store::{ChartKind, FixedAnswer};
use userdesk::worker::{spawn_seed_worker, WorkerHandle};
use userdesk::{handle_event, initialize, Action, AppState, Config, Event, SortOrder, ThemeMode, UserDraft};

const SEED: &str = r#"[
    {"id": 1, "name": "Leanne Graham", "username": "Bret", "email": "Sincere@april.biz", "phone": "1-770-736-8031"},
    {"id": 2, "name": "Ervin Howell", "username": "Antonette", "email": "Shanna@melissa.tv", "phone": "010-692-6593"},
    {"id": 3, "name": "Clementine Bauch", "username": "Samantha", "email": "Nathan@yesenia.net", "phone": "1-463-123-4447"},
    {"id": 4, "name": "Patricia Lebsack", "username": "Karianne", "email": "Julianne.OConner@kory.org", "phone": "493-170-9623"},
    {"id": 5, "name": "Chelsey Dietrich", "username": "Kamren", "email": "Lucio_Hettinger@annie.ca", "phone": "(254)954-1289"},
    {"id": 6, "name": "Mrs. Dennis Schulist", "username": "Leopoldo_Corkery", "email": "Karley_Dach@jasper.info", "phone": "1-477-935-8478"}
]"#;

struct Fixture {
    dir: TempDir,
    config: Config,
}

fn fixture() -> Fixture {
    let dir = TempDir::new().unwrap();
    let seed_path = dir.path().join("users.json");
    std::fs::write(&seed_path, SEED).unwrap();

    let config = Config {
        storage_path: Some(dir.path().join("prefs.json")),
        seed_path: Some(seed_path),
        ..Config::default()
    };
    Fixture { dir, config }
}

fn open(config: &Config) -> (AppState, Vec<Action>) {
    let storage = JsonKeyValueStore::new(config.storage_file()).unwrap();
    initialize(config, Box::new(storage)).unwrap()
}

fn send(state: &mut AppState, event: Event) -> Vec<Action> {
    handle_event(state, &event, &mut FixedAnswer(true)).unwrap().1
}

/// Forwards worker requests and feeds the replies back as events.
fn run_actions(state: &mut AppState, worker: &WorkerHandle, actions: Vec<Action>) -> Vec<Action> {
    let mut leftovers = vec![];
    for action in actions {
        match action {
            Action::PostToWorker(message) => {
                worker.post(message).unwrap();
                let response = worker.recv_timeout(Duration::from_secs(5)).unwrap();
                leftovers.extend(send(state, Event::WorkerResponse(response)));
            }
            other => leftovers.push(other),
        }
    }
    leftovers
}

fn login(state: &mut AppState) -> Vec<Action> {
    send(
        state,
        Event::Login {
            email: "admin@mail.com".to_string(),
            password: "secret".to_string(),
        },
    )
}

fn names(state: &AppState) -> Vec<String> {
    state.visible_users().into_iter().map(|u| u.name).collect()
}

#[test]
fn dashboard_session_from_login_to_restart() {
    let fx = fixture();
    let worker = spawn_seed_worker(Box::new(JsonFileSource::new(fx.config.seed_path.clone().unwrap()))).unwrap();

    let (mut state, actions) = open(&fx.config);
    assert!(actions.is_empty());
    assert_eq!(state.screen(), Screen::Login);

    let actions = login(&mut state);
    assert!(run_actions(&mut state, &worker, actions).is_empty());
    assert_eq!(state.store.len(), 5);
    assert!(state.store.get(6).is_none());

    let created = send(
        &mut state,
        Event::SubmitForm(UserDraft::new("Amy", "amy@example.com", "555-0100")),
    );
    assert!(created.is_empty());
    assert_eq!(state.store.users()[0].name, "Amy");

    let duplicate = send(
        &mut state,
        Event::SubmitForm(UserDraft::new("Amy Again", "AMY@example.com", "")),
    );
    assert_eq!(duplicate, vec![Action::notify(DUPLICATE_EMAIL_NOTICE)]);
    assert_eq!(state.store.len(), 6);

    send(&mut state, Event::SetSearchTerm("LE".to_string()));
    assert_eq!(names(&state), vec!["Clementine Bauch", "Leanne Graham", "Patricia Lebsack"]);

    send(&mut state, Event::SetSortOrder(SortOrder::Descending));
    assert_eq!(names(&state), vec!["Patricia Lebsack", "Leanne Graham", "Clementine Bauch"]);

    let stats = state.stats(chrono::Utc::now());
    assert_eq!(stats.total_users, 6);
    assert_eq!(stats.users_last_week, 1);

    send(&mut state, Event::ToggleTheme);
    assert_eq!(state.theme.mode(), ThemeMode::Dark);
    drop(state);

    let (restarted, actions) = open(&fx.config);
    assert_eq!(restarted.screen(), Screen::Dashboard);
    assert_eq!(restarted.theme.mode(), ThemeMode::Dark);
    assert!(restarted.store.is_empty());
    assert_eq!(actions.len(), 1);
}

#[test]
fn edit_and_confirmed_delete_round() {
    let fx = fixture();
    let worker = spawn_seed_worker(Box::new(JsonFileSource::new(fx.config.seed_path.clone().unwrap()))).unwrap();
    let (mut state, _) = open(&fx.config);
    let actions = login(&mut state);
    run_actions(&mut state, &worker, actions);

    send(&mut state, Event::EditUser { id: 2 });
    let vm = state.compute_viewmodel(chrono::Utc::now());
    let form = vm.form.unwrap();
    assert_eq!(form.title, "Edit User");
    assert_eq!(form.values.name, "Ervin Howell");
    assert!(vm.rows.iter().any(|r| r.id == 2 && r.is_editing));
    let stats = vm.stats.unwrap();
    assert_eq!(stats.chart.data, vec![5, 0]);
    let panels: Vec<(String, ChartKind)> = stats.panels.into_iter().map(|p| (p.title, p.kind)).collect();
    assert_eq!(
        panels,
        vec![
            ("Total Users".to_string(), ChartKind::Bar),
            ("User Activity Over Time".to_string(), ChartKind::Line),
        ]
    );

    send(
        &mut state,
        Event::SubmitForm(UserDraft::new("Ervin H.", "Shanna@melissa.tv", "010-692-6593")),
    );
    assert_eq!(state.store.get(2).unwrap().name, "Ervin H.");
    assert!(state.store.editing().is_none());

    let declined = handle_event(&mut state, &Event::DeleteUser { id: 2 }, &mut FixedAnswer(false)).unwrap();
    assert!(!declined.0);
    assert!(state.store.get(2).is_some());

    send(&mut state, Event::DeleteUser { id: 2 });
    assert!(state.store.get(2).is_none());
    assert_eq!(state.store.len(), 4);

    send(&mut state, Event::SetSearchTerm("zzz".to_string()));
    let vm = state.compute_viewmodel(chrono::Utc::now());
    assert!(vm.rows.is_empty());
    assert_eq!(vm.empty_state.unwrap().message, "No users found.");
}

#[test]
fn missing_seed_file_leaves_dashboard_empty() {
    let fx = fixture();
    let worker = spawn_seed_worker(Box::new(JsonFileSource::new(fx.dir.path().join("absent.json")))).unwrap();
    let (mut state, _) = open(&fx.config);

    let actions = login(&mut state);
    assert!(run_actions(&mut state, &worker, actions).is_empty());

    assert_eq!(state.screen(), Screen::Dashboard);
    assert!(state.store.is_empty());
    assert_eq!(state.stats(chrono::Utc::now()).total_users, 0);
}
