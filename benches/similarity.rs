use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use imrec::collaborative::rank_by_collaboration;
use imrec::content::rank_by_content;
use imrec::similarity::cosine_similarity_matrix;
use imrec::store::{ImageRecord, Preference, TagSnapshot};
use imrec::vectorizer::TfIdfVectorizer;
use rand::prelude::*;

const WORDS: &[&str] = &[
    "cat", "dog", "pet", "car", "city", "night", "sky", "beach", "sea", "boat", "harbor", "park",
    "tree", "flower", "mountain", "snow", "food", "cake", "person", "street",
];

fn random_corpus(rng: &mut impl Rng, n: usize) -> TagSnapshot {
    (0..n)
        .map(|i| {
            let amount = rng.random_range(1..6);
            let tags = WORDS.choose_multiple(rng, amount).copied();
            ImageRecord::new(format!("{i:06}.jpg"), tags)
        })
        .collect()
}

fn random_preferences(rng: &mut impl Rng, users: i64, images: usize, n: usize) -> Vec<Preference> {
    (0..n)
        .map(|_| {
            let image = rng.random_range(0..images);
            Preference::new(rng.random_range(0..users), format!("{image:06}.jpg"))
        })
        .collect()
}

fn bench_content(c: &mut Criterion) {
    let mut group = c.benchmark_group("Content");
    let mut rng = rand::rng();
    let vectorizer = TfIdfVectorizer::new();

    for n in [100, 1000] {
        let corpus = random_corpus(&mut rng, n);
        let tfidf = vectorizer.fit_transform(&corpus).unwrap();
        let liked = vec!["000000.jpg".to_string(), "000001.jpg".to_string()];

        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::new("fit_transform", n), &corpus, |b, corpus| {
            b.iter(|| vectorizer.fit_transform(black_box(corpus)).unwrap())
        });
        group.bench_with_input(BenchmarkId::new("cosine_matrix", n), &tfidf, |b, tfidf| {
            b.iter(|| cosine_similarity_matrix(black_box(tfidf.matrix().view())))
        });
        group.bench_with_input(BenchmarkId::new("rank", n), &tfidf, |b, tfidf| {
            b.iter(|| rank_by_content(black_box(tfidf), &liked, 10))
        });
    }
    group.finish();
}

fn bench_collaborative(c: &mut Criterion) {
    let mut group = c.benchmark_group("Collaborative");
    let mut rng = rand::rng();

    for users in [100, 1000] {
        let preferences = random_preferences(&mut rng, users, 2000, users as usize * 20);
        group.bench_with_input(BenchmarkId::new("rank", users), &preferences, |b, preferences| {
            b.iter(|| {
                let user = preferences[0].user_id;
                rank_by_collaboration(black_box(preferences), user, 10, 10).unwrap()
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_content, bench_collaborative);
criterion_main!(benches);
