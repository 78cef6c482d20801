#[macro_export]
macro_rules! regex {
    ($pat:literal) => {{
        static RE: once_cell::sync::Lazy<regex::Regex> =
            once_cell::sync::Lazy::new(|| regex::Regex::new($pat).unwrap());
        &*RE
    }};
}

/// Declares a closed tag set: a fieldless enum, its string names, and a
/// bitflags set type with one bit per variant.
///
/// ```text
/// tag_set! {
///     kind: "pos", enum Pos, set PosSet: u32,
///     Noun / NOUN => "NOUN",
///     ...
/// }
/// ```
macro_rules! tag_set {
    (
        kind: $kind:literal, enum $name:ident, set $set:ident : $bits:ty,
        $( $variant:ident / $flag:ident => $text:literal ),+ $(,)?
    ) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            /// Every member of the set, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Name as produced by the parser (e.g. `"nsubj"`, `"PROPN"`).
            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $text),+
                }
            }

            /// Single-member set for this tag.
            pub const fn set(self) -> $set {
                match self {
                    $($name::$variant => $set::$flag),+
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::TreeError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($text => Ok($name::$variant),)+
                    _ => Err($crate::TreeError::UnknownTag { kind: $kind, tag: s.to_string() }),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl serde::Serialize for $name {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let raw = String::deserialize(deserializer)?;
                raw.parse().map_err(serde::de::Error::custom)
            }
        }

        bitflags::bitflags! {
            #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
            pub struct $set: $bits {
                $(const $flag = 1 << ($name::$variant as $bits);)+
            }
        }

        impl $set {
            /// True when `tag` is a member of this set.
            pub fn has(self, tag: $name) -> bool {
                self.contains(tag.set())
            }

            /// Members of the set, in declaration order.
            pub fn members(self) -> impl Iterator<Item = $name> {
                $name::ALL.iter().copied().filter(move |t| self.has(*t))
            }
        }

        impl From<$name> for $set {
            fn from(tag: $name) -> Self {
                tag.set()
            }
        }

        impl FromIterator<$name> for $set {
            fn from_iter<I: IntoIterator<Item = $name>>(iter: I) -> Self {
                iter.into_iter().fold($set::empty(), |acc, t| acc | t.set())
            }
        }

        impl serde::Serialize for $set {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.collect_seq(self.members().map(|t| t.as_str()))
            }
        }

        impl<'de> serde::Deserialize<'de> for $set {
            fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let raw: Vec<$name> = Vec::deserialize(deserializer)?;
                Ok(raw.into_iter().collect())
            }
        }
    };
}

/// Builds an [`engine::MergeRule`](crate::engine::MergeRule): a name, the
/// labels and coarse features the tree must carry for the rule to be tried,
/// and a `find` closure returning merge candidates for one tree.
macro_rules! merge_rule {
    (
        name: $name:expr
        $(, requires: $requires:expr)?
        $(, features: $features:expr)?
        , find: |$tree:ident| $body:block
        $(,)?
    ) => {{
        $crate::engine::MergeRule {
            name: $name,
            requires: { $crate::DepSet::empty() $(| $requires)? },
            features: { $crate::engine::FeatureMask::empty() $(| $features)? },
            find: Box::new(move |$tree: &$crate::SentenceTree| -> Vec<$crate::engine::Candidate> { $body }),
        }
    }};
}
