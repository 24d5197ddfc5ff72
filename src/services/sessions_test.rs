use super::*;

const TTL: Duration = Duration::from_secs(60);

#[test]
fn insert_get_remove() {
    let mut sessions = BookingSessions::new(TTL);
    let id = sessions.insert(BookingForm::new());
    assert_eq!(sessions.get(&id).map(BookingForm::id), Some(id));
    assert_eq!(sessions.len(), 1);

    assert!(sessions.remove(&id).is_some());
    assert!(sessions.get(&id).is_none());
    assert!(sessions.remove(&id).is_none());
    assert_eq!(sessions.len(), 0);
}

#[test]
fn idle_forms_are_evicted_after_ttl() {
    let mut sessions = BookingSessions::new(TTL);
    for _ in 0..50 {
        sessions.insert(BookingForm::new());
    }
    assert_eq!(sessions.evict_idle(Instant::now()), 0);
    assert_eq!(sessions.evict_idle(Instant::now() + TTL), 50);
    assert_eq!(sessions.len(), 0);
}

#[test]
fn mutable_access_keeps_form_alive() {
    let mut sessions = BookingSessions::new(Duration::from_millis(40));
    let stale = sessions.insert(BookingForm::new());
    let active = sessions.insert(BookingForm::new());

    std::thread::sleep(Duration::from_millis(30));
    sessions.get_mut(&active).unwrap();
    std::thread::sleep(Duration::from_millis(20));

    assert_eq!(sessions.evict_idle(Instant::now()), 1);
    assert!(sessions.get(&stale).is_none());
    assert!(sessions.get(&active).is_some());
}

#[test]
fn default_limits() {
    let limits = SessionLimits::default();
    assert_eq!(limits.idle_ttl, Duration::from_secs(1800));
    assert_eq!(limits.sweep_interval, Duration::from_secs(60));
}

#[tokio::test]
async fn sweeper_frees_idle_forms() {
    let sessions = Arc::new(RwLock::new(BookingSessions::new(Duration::from_millis(1))));
    sessions.write().await.insert(BookingForm::new());
    sessions.write().await.insert(BookingForm::new());

    let sweeper = spawn_session_sweeper(sessions.clone(), Duration::from_millis(5));
    let mut open = usize::MAX;
    for _ in 0..100 {
        open = sessions.read().await.len();
        if open == 0 {
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    sweeper.abort();
    assert_eq!(open, 0);
}
