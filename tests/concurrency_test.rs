use std::sync::atomic::Ordering;
use std::sync::Arc;

use futures::future::join_all;

use canopy::{
    CachedProvider, DeleteRequest, GetDataRequest, MockProvider, NodeProvider, ReadCache,
    SetDataRequest, Xid,
};

fn read_req(path: &str) -> GetDataRequest {
    GetDataRequest {
        path: path.to_string(),
        watch: false,
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn operations_on_distinct_paths_never_interact() {
    let provider = Arc::new(MockProvider::new());
    let cache = Arc::new(ReadCache::new());
    let wrapped = Arc::new(CachedProvider::new(provider.clone(), cache.clone()));

    let paths: Vec<String> = (0..16).map(|i| format!("/load/node-{i}")).collect();
    for (i, path) in paths.iter().enumerate() {
        provider.put_node(path.clone(), format!("data-{i}").into_bytes()).await;
        wrapped.get_data(i as Xid, &read_req(path)).await;
    }

    // Delete the odd paths while hammering reads on the even ones.
    let mut tasks = Vec::new();
    for (i, path) in paths.iter().enumerate() {
        let wrapped = wrapped.clone();
        let path = path.clone();
        if i % 2 == 1 {
            tasks.push(tokio::spawn(async move {
                wrapped
                    .delete(
                        1000 + i as Xid,
                        &DeleteRequest {
                            path,
                            version: -1,
                        },
                    )
                    .await;
            }));
        } else {
            tasks.push(tokio::spawn(async move {
                for round in 0..50usize {
                    let resp = wrapped
                        .get_data(2000 + (i * 100 + round) as Xid, &read_req(&path))
                        .await;
                    assert!(resp.is_ok());
                }
            }));
        }
    }
    join_all(tasks).await.into_iter().for_each(|r| r.unwrap());

    for (i, path) in paths.iter().enumerate() {
        if i % 2 == 1 {
            assert!(!cache.contains(path), "deleted path left in cache: {path}");
        } else {
            let entry = cache.lookup(path).expect("surviving path evicted");
            assert_eq!(
                entry.as_get_data().unwrap().data.to_vec(),
                format!("data-{i}").into_bytes(),
                "cache entry for {path} was disturbed by unrelated deletes"
            );
        }
    }
    // Every surviving path was a hit for all 50 rounds: one provider read per
    // path, nothing more.
    assert_eq!(provider.calls().get_data.load(Ordering::SeqCst), 16);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_hits_each_echo_their_own_xid() {
    let provider = Arc::new(MockProvider::new());
    let cache = Arc::new(ReadCache::new());
    let wrapped = Arc::new(CachedProvider::new(provider.clone(), cache));

    provider.put_node("/hot", b"payload".to_vec()).await;
    wrapped.get_data(1, &read_req("/hot")).await;

    let tasks: Vec<_> = (100..164)
        .map(|xid| {
            let wrapped = wrapped.clone();
            tokio::spawn(async move {
                let resp = wrapped.get_data(xid, &read_req("/hot")).await;
                assert!(resp.is_ok());
                assert_eq!(resp.header.xid, xid);
                resp.as_get_data().unwrap().data.to_vec()
            })
        })
        .collect();

    for payload in join_all(tasks).await {
        assert_eq!(payload.unwrap(), b"payload");
    }
    assert_eq!(provider.calls().get_data.load(Ordering::SeqCst), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn racing_writes_converge_to_a_written_value() {
    let provider = Arc::new(MockProvider::new());
    let cache = Arc::new(ReadCache::new());
    let wrapped = Arc::new(CachedProvider::new(provider.clone(), cache.clone()));

    provider.put_node("/contended", b"initial".to_vec()).await;
    wrapped.get_data(1, &read_req("/contended")).await;

    let values: Vec<Vec<u8>> = (0..8).map(|i| format!("write-{i}").into_bytes()).collect();
    let tasks: Vec<_> = values
        .iter()
        .enumerate()
        .map(|(i, value)| {
            let wrapped = wrapped.clone();
            let value = value.clone();
            tokio::spawn(async move {
                wrapped
                    .set_data(
                        10 + i as Xid,
                        &SetDataRequest {
                            path: "/contended".to_string(),
                            data: value,
                            version: -1,
                        },
                    )
                    .await;
            })
        })
        .collect();
    join_all(tasks).await.into_iter().for_each(|r| r.unwrap());

    // Whichever write landed last, the cached bytes are one of the written
    // values, never a torn or stale-initial buffer.
    let cached = cache
        .lookup("/contended")
        .expect("entry survived the writes")
        .as_get_data()
        .expect("get-data body")
        .data
        .to_vec();
    assert!(values.contains(&cached), "unexpected cached value");
    assert_eq!(provider.calls().set_data.load(Ordering::SeqCst), 8);
}
