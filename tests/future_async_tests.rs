#![cfg(feature = "async")]

use forkable::future::{Fault, Future, FutureT};
use rstest::rstest;
use std::time::Duration;

fn delayed<A: Send + 'static>(value: A, delay: Duration) -> Future<String, A> {
    let handle = tokio::runtime::Handle::current();
    Future::new(move |_reject, resolve| {
        handle.spawn(async move {
            tokio::time::sleep(delay).await;
            resolve(value);
        });
    })
}

#[rstest]
#[tokio::test]
async fn into_async_awaits_timer_resolution() {
    let future = delayed(20, Duration::from_millis(10)).map(|x| x + 1);
    assert_eq!(future.into_async().await, Ok(21));
}

#[rstest]
#[tokio::test]
async fn into_async_surfaces_rejection() {
    let future: Future<String, i32> = delayed(1, Duration::from_millis(5))
        .chain(|value| Future::reject(format!("refused {value}")));
    assert_eq!(future.into_async().await, Err("refused 1".to_string()));
}

#[rstest]
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn ap_joins_timers_settling_out_of_order() {
    let slow_function: Future<String, fn(i32) -> i32> = {
        let handle = tokio::runtime::Handle::current();
        Future::<String, fn(i32) -> i32>::new(move |_reject, resolve| {
            handle.spawn(async move {
                tokio::time::sleep(Duration::from_millis(30)).await;
                resolve(|x| x * 2);
            });
        })
    };
    let fast_value = delayed(21, Duration::from_millis(1));

    assert_eq!(slow_function.ap(fast_value).into_async().await, Ok(42));
}

#[rstest]
#[tokio::test]
async fn into_async_reports_abandoned_fork() {
    let future: Future<Fault, i32> = Future::new(|reject, resolve| {
        drop(reject);
        drop(resolve);
    });
    assert_eq!(future.into_async().await, Err(Fault::Abandoned));
}

#[rstest]
#[tokio::test]
async fn transformer_into_async_yields_inner_monad() {
    let lifted = FutureT::<String, Option<()>>::lift_future(delayed("cached", Duration::from_millis(2)))
        .chain_inner(|text| text.strip_prefix("ca"));
    assert_eq!(lifted.into_async().await, Ok(Some("ched")));
}

#[rstest]
#[tokio::test]
async fn into_async_is_lazy_until_awaited() {
    let (sender, mut receiver) = tokio::sync::mpsc::unbounded_channel();
    let future: Future<String, ()> = Future::new(move |_reject, resolve| {
        let _ = sender.send("forked");
        resolve(());
    });

    let pending = future.into_async();
    assert!(receiver.try_recv().is_err());
    assert_eq!(pending.await, Ok(()));
    assert_eq!(receiver.recv().await, Some("forked"));
}
