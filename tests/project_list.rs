use chrono::{Duration, Local};
use std::collections::HashSet;
use todo_projects::{
    CompletionFilter, ModelError, NewTask, ProjectList, ProjectListSeed, TaskDisposal, TaskEdit,
    INBOX_ID,
};

fn all_task_ids(list: &ProjectList) -> Vec<u64> {
    list.export()
        .projects
        .into_iter()
        .flat_map(|p| p.tasks)
        .map(|t| t.id)
        .collect()
}

#[test]
fn work_project_walkthrough() {
    let now = Local::now();
    let today = now.date_naive();
    let mut list = ProjectList::new();

    let work = list.add_project("Work").expect("project should be created");
    assert_eq!(work, 1);

    let ship = list
        .add_task(work, NewTask::named("Ship").due(today))
        .expect("task should be created");
    assert_eq!(ship, 0);

    list.move_task(work, ship, INBOX_ID).expect("move should succeed");
    let moved = list.task_data(INBOX_ID, ship).expect("task should be in the Inbox");
    assert_eq!(moved.project_id, INBOX_ID);
    assert_eq!(moved.id, 0);

    list.delete_project(work, TaskDisposal::MoveToInbox)
        .expect("Work should be deletable");
    let snapshot = list.export();
    assert_eq!(snapshot.projects.len(), 1);
    assert_eq!(snapshot.projects[0].tasks.len(), 1);
    assert_eq!(snapshot.projects[0].tasks[0].name, "Ship");

    let due_today = list.today_view(now, CompletionFilter::ActiveOnly);
    assert_eq!(due_today.len(), 1);
}

#[test]
fn ids_stay_unique_and_freed_ids_come_back_first() {
    let mut list = ProjectList::new();
    let work = list.add_project("Work").unwrap();
    for i in 0..6 {
        let project = if i % 2 == 0 { INBOX_ID } else { work };
        list.add_task(project, NewTask::named(format!("task {i}"))).unwrap();
    }

    list.delete_task(work, 3).unwrap();
    list.delete_task(INBOX_ID, 2).unwrap();

    let reused_a = list.add_task(work, NewTask::named("again")).unwrap();
    let reused_b = list.add_task(INBOX_ID, NewTask::named("again")).unwrap();
    let fresh = list.add_task(INBOX_ID, NewTask::named("new")).unwrap();
    assert_eq!((reused_a, reused_b, fresh), (2, 3, 6));

    let ids = all_task_ids(&list);
    let unique: HashSet<_> = ids.iter().copied().collect();
    assert_eq!(ids.len(), unique.len());
}

#[test]
fn deleting_inbox_always_fails() {
    let mut list = ProjectList::new();
    let task = list.add_task(INBOX_ID, NewTask::named("keep")).unwrap();
    let before = list.export();

    assert_eq!(
        list.delete_project(INBOX_ID, TaskDisposal::Delete),
        Err(ModelError::InboxProtected)
    );
    assert_eq!(list.export(), before);
    assert!(list.task_data(INBOX_ID, task).is_ok());
}

#[test]
fn edit_without_description_clears_it() {
    let mut list = ProjectList::new();
    let task = list
        .add_task(INBOX_ID, NewTask::named("report").description("first draft"))
        .unwrap();

    let edit = TaskEdit {
        name: Some("report".into()),
        ..TaskEdit::default()
    };
    list.edit_task(INBOX_ID, task, edit).unwrap();

    assert_eq!(list.task_data(INBOX_ID, task).unwrap().description, None);
}

#[test]
fn today_view_boundaries() {
    let now = Local::now();
    let today = now.date_naive();
    let mut list = ProjectList::new();
    let due_today = list.add_task(INBOX_ID, NewTask::named("today").due(today)).unwrap();
    list.add_task(INBOX_ID, NewTask::named("tomorrow").due(today + Duration::days(1)))
        .unwrap();
    list.add_task(INBOX_ID, NewTask::named("someday")).unwrap();

    let ids: Vec<_> = list
        .today_view(now, CompletionFilter::ActiveOnly)
        .into_iter()
        .map(|t| t.id)
        .collect();
    assert_eq!(ids, vec![due_today]);
}

#[test]
fn json_round_trip_preserves_everything() {
    let mut list = ProjectList::new();
    let work = list.add_project("Work").unwrap();
    let home = list.add_project("Home").unwrap();
    list.add_task(work, NewTask::named("a").description("alpha")).unwrap();
    let b = list.add_task(home, NewTask::named("b")).unwrap();
    list.toggle_task(home, b).unwrap();
    list.delete_project(work, TaskDisposal::Delete).unwrap();

    let json = serde_json::to_string(&list.export()).unwrap();
    let seed: ProjectListSeed = serde_json::from_str(&json).unwrap();
    let reloaded = ProjectList::from_seed(seed).unwrap();

    assert_eq!(reloaded.export(), list.export());
    // Freed ids stay free after a reload.
    let mut reloaded = reloaded;
    assert_eq!(reloaded.add_project("Next"), Ok(1));
}

#[test]
fn renamed_inbox_survives_round_trip() {
    let mut list = ProjectList::new();
    list.rename_project(INBOX_ID, "Personal").unwrap();
    list.add_task(INBOX_ID, NewTask::named("call")).unwrap();

    let json = serde_json::to_string(&list.export()).unwrap();
    let seed: ProjectListSeed = serde_json::from_str(&json).unwrap();
    let reloaded = ProjectList::from_seed(seed).unwrap();

    assert_eq!(reloaded.project_data(INBOX_ID).unwrap().name, "Personal");
    assert_eq!(reloaded.export(), list.export());
}

#[test]
fn two_inbox_records_fail_to_load() {
    let seed: ProjectListSeed = serde_json::from_str(
        r#"{"projects":[
            {"id":0,"name":"Inbox","tasks":[{"id":1,"name":"a"}]},
            {"id":0,"name":"Other","tasks":[{"id":2,"name":"b"}]}
        ]}"#,
    )
    .unwrap();
    assert!(matches!(
        ProjectList::from_seed(seed),
        Err(ModelError::Alloc(_))
    ));
}

#[test]
fn exported_json_uses_plain_field_names() {
    let mut list = ProjectList::new();
    list.add_task(INBOX_ID, NewTask::named("a")).unwrap();
    let value = serde_json::to_value(list.export()).unwrap();
    let task = &value["projects"][0]["tasks"][0];
    assert_eq!(task["id"], 0);
    assert_eq!(task["project_id"], 0);
    assert_eq!(task["priority"], "low");
    assert_eq!(task["completed"], false);
    assert!(task["due_date"].is_null());
    assert!(task["creation_date"].is_string());
}
