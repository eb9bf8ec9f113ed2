//! Animation styles for widget mutations.

/// The animation the host widget should use for an insert, delete or
/// reload.
///
/// Moves carry no style: the widget's move primitive is styleless.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RowAnimation {
    /// Fade rows in or out.
    Fade,
    /// Slide in from, or out to, the right.
    Right,
    /// Slide in from, or out to, the left.
    Left,
    /// Slide in from, or out to, the top.
    Top,
    /// Slide in from, or out to, the bottom.
    Bottom,
    /// No animation.
    None,
    /// Keep the row centered while it grows or shrinks.
    Middle,
    /// Let the widget choose.
    #[default]
    Automatic,
}

/// Items bucketed by animation, in the order each animation was first seen.
///
/// One widget call is issued per bucket, so the number of calls tracks the
/// number of distinct animations rather than the number of items.
#[derive(Debug, Clone)]
pub(crate) struct AnimationGroups<T> {
    groups: Vec<(RowAnimation, Vec<T>)>,
}

impl<T> Default for AnimationGroups<T> {
    fn default() -> Self {
        Self { groups: Vec::new() }
    }
}

impl<T> AnimationGroups<T> {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, animation: RowAnimation, item: T) {
        self.bucket(animation).push(item);
    }

    pub(crate) fn extend<I>(&mut self, animation: RowAnimation, items: I)
    where
        I: IntoIterator<Item = T>,
    {
        let mut items = items.into_iter().peekable();
        if items.peek().is_some() {
            self.bucket(animation).extend(items);
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.groups.iter().all(|(_, items)| items.is_empty())
    }

    /// Total number of items across all buckets.
    pub(crate) fn len(&self) -> usize {
        self.groups.iter().map(|(_, items)| items.len()).sum()
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (RowAnimation, &[T])> + '_ {
        self.groups
            .iter()
            .filter(|(_, items)| !items.is_empty())
            .map(|(animation, items)| (*animation, items.as_slice()))
    }

    /// Maps every item, keeping the buckets.
    pub(crate) fn map<U>(self, mut f: impl FnMut(T) -> U) -> AnimationGroups<U> {
        AnimationGroups {
            groups: self
                .groups
                .into_iter()
                .map(|(animation, items)| (animation, items.into_iter().map(&mut f).collect()))
                .collect(),
        }
    }

    fn bucket(&mut self, animation: RowAnimation) -> &mut Vec<T> {
        let position = match self.groups.iter().position(|(a, _)| *a == animation) {
            Some(position) => position,
            None => {
                self.groups.push((animation, Vec::new()));
                self.groups.len() - 1
            }
        };
        &mut self.groups[position].1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_groups_keep_first_seen_order() {
        let mut groups = AnimationGroups::new();
        groups.push(RowAnimation::Left, 1);
        groups.push(RowAnimation::Fade, 2);
        groups.push(RowAnimation::Left, 3);

        let collected: Vec<_> = groups.iter().map(|(a, items)| (a, items.to_vec())).collect();
        assert_eq!(
            collected,
            vec![(RowAnimation::Left, vec![1, 3]), (RowAnimation::Fade, vec![2])]
        );
        assert_eq!(groups.len(), 3);
    }

    #[test]
    fn test_empty_extend_creates_no_bucket() {
        let mut groups: AnimationGroups<usize> = AnimationGroups::new();
        groups.extend(RowAnimation::Top, Vec::new());
        assert!(groups.is_empty());
        assert_eq!(groups.iter().count(), 0);
    }

    #[test]
    fn test_map_keeps_buckets() {
        let mut groups = AnimationGroups::new();
        groups.extend(RowAnimation::Fade, [0, 1]);
        let mapped = groups.map(|row| row + 10);
        let collected: Vec<_> = mapped.iter().map(|(_, items)| items.to_vec()).collect();
        assert_eq!(collected, vec![vec![10, 11]]);
    }

    #[test]
    fn test_default_is_automatic() {
        assert_eq!(RowAnimation::default(), RowAnimation::Automatic);
    }
}
