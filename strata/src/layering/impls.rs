//! [`Layered`] implementations for standard library and serde types.

use std::collections::{BTreeMap, HashMap};
use std::hash::{BuildHasher, Hash};
use std::path::PathBuf;
use std::time::Duration;

use camino::Utf8PathBuf;
use serde_json::{Map, Value};

use super::{Layered, PathStep, Shape};

macro_rules! stronger_wins {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Layered for $ty {
                fn merge(&self, _weaker: &Self) -> Self {
                    Clone::clone(self)
                }
            }
        )*
    };
}

stronger_wins!(
    bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64,
    String, PathBuf, Utf8PathBuf, Duration, (),
);

fn describe_child<T: Layered>(
    segments: &[&str],
    steps: &mut Vec<PathStep>,
    container: Shape,
) {
    let Some((head, rest)) = segments.split_first() else {
        return;
    };
    steps.push(PathStep::new(*head, container));
    T::describe_path(rest, steps);
}

impl<T: Layered> Layered for Option<T> {
    fn merge(&self, weaker: &Self) -> Self {
        match (self, weaker) {
            (None, _) => weaker.clone(),
            (Some(strong), Some(weak)) => Some(strong.merge(weak)),
            (Some(strong), None) => Some(strong.clone()),
        }
    }

    fn describe_path(segments: &[&str], steps: &mut Vec<PathStep>) {
        T::describe_path(segments, steps);
    }
}

impl<T: Layered> Layered for Box<T> {
    fn merge(&self, weaker: &Self) -> Self {
        Self::new(self.as_ref().merge(weaker.as_ref()))
    }

    fn describe_path(segments: &[&str], steps: &mut Vec<PathStep>) {
        T::describe_path(segments, steps);
    }
}

impl<T: Layered> Layered for Vec<T> {
    fn merge(&self, _weaker: &Self) -> Self {
        self.clone()
    }

    fn describe_path(segments: &[&str], steps: &mut Vec<PathStep>) {
        describe_child::<T>(segments, steps, Shape::Sequence);
    }
}

impl<T: Layered, const N: usize> Layered for [T; N] {
    fn merge(&self, weaker: &Self) -> Self {
        let mut merged = self.clone();
        for (slot, weak) in merged.iter_mut().zip(weaker) {
            *slot = slot.merge(weak);
        }
        merged
    }

    fn describe_path(segments: &[&str], steps: &mut Vec<PathStep>) {
        describe_child::<T>(segments, steps, Shape::Sequence);
    }
}

impl<K, V, S> Layered for HashMap<K, V, S>
where
    K: Eq + Hash + Clone,
    V: Layered,
    S: BuildHasher + Clone,
{
    fn merge(&self, weaker: &Self) -> Self {
        let mut merged = weaker.clone();
        for (key, strong) in self {
            let value = weaker
                .get(key)
                .map_or_else(|| strong.clone(), |weak| strong.merge(weak));
            merged.insert(key.clone(), value);
        }
        merged
    }

    fn describe_path(segments: &[&str], steps: &mut Vec<PathStep>) {
        describe_child::<V>(segments, steps, Shape::Map);
    }
}

impl<K, V> Layered for BTreeMap<K, V>
where
    K: Ord + Clone,
    V: Layered,
{
    fn merge(&self, weaker: &Self) -> Self {
        let mut merged = weaker.clone();
        for (key, strong) in self {
            let value = weaker
                .get(key)
                .map_or_else(|| strong.clone(), |weak| strong.merge(weak));
            merged.insert(key.clone(), value);
        }
        merged
    }

    fn describe_path(segments: &[&str], steps: &mut Vec<PathStep>) {
        describe_child::<V>(segments, steps, Shape::Map);
    }
}

impl Layered for Map<String, Value> {
    fn merge(&self, weaker: &Self) -> Self {
        let mut merged = weaker.clone();
        for (key, strong) in self {
            let value = weaker
                .get(key)
                .map_or_else(|| strong.clone(), |weak| strong.merge(weak));
            merged.insert(key.clone(), value);
        }
        merged
    }

    fn describe_path(segments: &[&str], steps: &mut Vec<PathStep>) {
        describe_child::<Value>(segments, steps, Shape::Map);
    }
}

impl Layered for Value {
    fn merge(&self, weaker: &Self) -> Self {
        match (self, weaker) {
            (Self::Null, _) => weaker.clone(),
            (Self::Object(strong), Self::Object(weak)) => Self::Object(strong.merge(weak)),
            _ => self.clone(),
        }
    }
}
