//! end-to-end workflow scenarios against an in-memory database.

use proptest::prelude::*;
use studybuddy_db::{Database, StudybuddyDb};
use studybuddy_types::{
    Department, ResourceStatus, ResourceType, Subject, SubjectId, User,
    test_utils::TestUserBuilder,
};
use studybuddy_workflow::{NewResource, Workflow, WorkflowError};

fn note(subject_id: SubjectId, title: &str) -> NewResource {
    NewResource {
        subject_id,
        title: title.to_string(),
        file: format!("resources/abcdef0123456789_{title}.pdf"),
        resource_type: ResourceType::Note,
        description: Some("week one".to_string()),
    }
}

async fn setup() -> (Workflow<StudybuddyDb>, Subject, User, User) {
    let db = StudybuddyDb::new_in_memory().await.unwrap();
    let dept = db
        .create_department(&Department::new("Computer Science"))
        .await
        .unwrap();
    let subject = db
        .create_subject(&Subject::new(dept.id, "Operating Systems", 4))
        .await
        .unwrap();
    let staff = db
        .create_user(&TestUserBuilder::new("u_staff").faculty().build())
        .await
        .unwrap();
    let student = db
        .create_user(&TestUserBuilder::new("t_student").build())
        .await
        .unwrap();
    (Workflow::new(db), subject, staff, student)
}

#[tokio::test]
async fn test_upload_review_scenario() {
    let (wf, subject, staff, student) = setup().await;

    let r = wf
        .upload_resource(&staff, note(subject.id, "scheduling"))
        .await
        .unwrap();
    assert_eq!(r.status, ResourceStatus::Approved);

    let err = wf
        .upload_resource(&student, note(subject.id, "paging"))
        .await
        .unwrap_err();
    assert!(matches!(err, WorkflowError::PermissionDenied(_)));

    wf.grant_uploader(&staff, student.id).await.unwrap();
    let r2 = wf
        .upload_resource(&student, note(subject.id, "paging"))
        .await
        .unwrap();
    assert_eq!(r2.status, ResourceStatus::Pending);

    let pending = wf.list_pending(&staff).await.unwrap();
    assert_eq!(pending.iter().map(|r| r.id).collect::<Vec<_>>(), vec![r2.id]);

    let approved = wf
        .set_resource_status(&staff, r2.id, ResourceStatus::Approved)
        .await
        .unwrap();
    assert_eq!(approved.status, ResourceStatus::Approved);

    let listed = wf
        .list_by_subject_and_type(&student, subject.id, ResourceType::Note, None)
        .await
        .unwrap();
    assert_eq!(listed.len(), 2);
    assert!(wf.list_pending(&staff).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_revoked_student_cannot_upload() {
    let (wf, subject, staff, student) = setup().await;

    wf.grant_uploader(&staff, student.id).await.unwrap();
    wf.revoke_uploader(&staff, student.id).await.unwrap();

    let err = wf
        .upload_resource(&student, note(subject.id, "threads"))
        .await
        .unwrap_err();
    assert!(matches!(err, WorkflowError::PermissionDenied(_)));
}

#[tokio::test]
async fn test_deleting_resource_drops_bookmarks() {
    let (wf, subject, staff, student) = setup().await;
    let r = wf
        .upload_resource(&staff, note(subject.id, "deadlocks"))
        .await
        .unwrap();
    wf.toggle_bookmark(&student, r.id).await.unwrap();

    wf.delete_resource(&staff, r.id).await.unwrap();
    assert!(wf.bookmarked_ids(&student).await.unwrap().is_empty());
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn toggle_parity_decides_bookmark(toggles in 1usize..6) {
        let rt = tokio::runtime::Runtime::new().unwrap();
        rt.block_on(async {
            let (wf, subject, staff, student) = setup().await;
            let r = wf.upload_resource(&staff, note(subject.id, "fs")).await.unwrap();

            for _ in 0..toggles {
                wf.toggle_bookmark(&student, r.id).await.unwrap();
            }

            let ids = wf.bookmarked_ids(&student).await.unwrap();
            assert_eq!(!ids.is_empty(), toggles % 2 == 1);
        });
    }

    #[test]
    fn grant_revoke_sequences_keep_one_row(ops in proptest::collection::vec(any::<bool>(), 1..8)) {
        let rt = tokio::runtime::Runtime::new().unwrap();
        rt.block_on(async {
            let (wf, _, staff, student) = setup().await;
            wf.grant_uploader(&staff, student.id).await.unwrap();

            let mut active = true;
            for grant in &ops {
                if *grant {
                    wf.grant_uploader(&staff, student.id).await.unwrap();
                    active = true;
                } else {
                    wf.revoke_uploader(&staff, student.id).await.unwrap();
                    active = false;
                }
            }

            let rows = wf.db().list_uploaders(false).await.unwrap();
            assert_eq!(rows.len(), 1);
            assert_eq!(rows[0].is_active, active);
        });
    }
}
