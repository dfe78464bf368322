/* 📖 # Provider Test Suite

String-level tests for every Provider operation, run against POSIX and Windows providers backed
by MockPal so the results do not depend on the host platform:
- clean, dir, base, ext, root and volume name tables
- rel including the lexical failure cases
- join, abs and normalize
- algebraic properties over a shared corpus of paths
*/

#[cfg(test)]
mod provider_string_tests {
    use crate::{Comparison, Parser, PathStyle, Provider, ProviderConfig};
    use crosspath_base::{ErrorKind, MockPal, PalHandle, Platform};
    use expect_test::expect;

    fn posix() -> Provider {
        Provider::new(PalHandle::new(MockPal::new().with_platform(Platform::Linux)))
    }

    fn windows() -> Provider {
        Provider::new(PalHandle::new(MockPal::new().with_platform(Platform::Windows)))
    }

    fn check(
        name: &str,
        provider: &Provider,
        op: fn(&Provider, &str) -> String,
        cases: &[(&str, &str)],
    ) {
        for (index, (input, expected)) in cases.iter().enumerate() {
            let actual = op(provider, input);
            assert_eq!(
                &actual, expected,
                "{}[{}] given '{}' expected '{}' actual '{}'",
                name, index, input, expected, actual
            );
        }
    }

    fn clean(provider: &Provider, path: &str) -> String {
        provider.clean(path).unwrap()
    }

    fn dir(provider: &Provider, path: &str) -> String {
        provider.dir(path).unwrap()
    }

    fn base(provider: &Provider, path: &str) -> String {
        provider.base(path).unwrap()
    }

    #[test]
    fn test_clean_posix() {
        check(
            "clean",
            &posix(),
            clean,
            &[
                // already clean
                ("abc", "abc"),
                ("abc/def", "abc/def"),
                ("a/b/c", "a/b/c"),
                (".", "."),
                ("..", ".."),
                ("../..", "../.."),
                ("../../abc", "../../abc"),
                ("/abc", "/abc"),
                ("/", "/"),
                // empty is the current directory
                ("", "."),
                // trailing separators
                ("abc/", "abc"),
                ("abc/def/", "abc/def"),
                ("a/b/c/", "a/b/c"),
                ("./", "."),
                ("../", ".."),
                ("../../", "../.."),
                ("/abc/", "/abc"),
                // doubled separators
                ("abc//def//ghi", "abc/def/ghi"),
                ("abc//", "abc"),
                ("//abc", "/abc"),
                ("///abc", "/abc"),
                ("//abc//", "/abc"),
                // . elements
                ("abc/./def", "abc/def"),
                ("/./abc/def", "/abc/def"),
                ("abc/.", "abc"),
                // .. elements
                ("abc/def/ghi/../jkl", "abc/def/jkl"),
                ("abc/def/../ghi/../jkl", "abc/jkl"),
                ("abc/def/..", "abc"),
                ("abc/def/../..", "."),
                ("/abc/def/../..", "/"),
                ("abc/def/../../..", ".."),
                ("/abc/def/../../..", "/"),
                ("abc/def/../../../ghi/jkl/../../../mno", "../../mno"),
                ("/../abc", "/abc"),
                ("a/b/../c", "a/c"),
                // combinations
                ("abc/./../def", "def"),
                ("abc//./../def", "def"),
                ("abc/../../././../def", "../../def"),
            ],
        );
    }

    #[test]
    fn test_clean_windows() {
        check(
            "clean",
            &windows(),
            clean,
            &[
                (r"c:", r"c:."),
                (r"c:\", r"c:\"),
                (r"c:\abc", r"c:\abc"),
                (r"c:abc\..\..\.\.\..\def", r"c:..\..\def"),
                (r"c:\abc\def\..\..", r"c:\"),
                (r"c:\..\abc", r"c:\abc"),
                (r"c:..\abc", r"c:..\abc"),
                (r"\", r"\"),
                (r"/", r"\"),
                (r"\\i\..\c$", r"\\i\..\c$"),
                (r"\\i\..\i\c$", r"\\i\..\i\c$"),
                (r"\\i\..\I\c$", r"\\i\..\I\c$"),
                (r"\\host\share\foo\..\bar", r"\\host\share\bar"),
                (r"//host/share/foo/../baz", r"\\host\share\baz"),
                (r"\\host\share\foo\..\..\..\..\bar", r"\\host\share\bar"),
                (r"\\.\C:\a\..\..\..\..\bar", r"\\.\C:\bar"),
                (r"\\.\C:\\\\a", r"\\.\C:\a"),
                (r"\\a\b\..\c", r"\\a\b\c"),
                (r"\\a\b", r"\\a\b"),
                (r".\c:", r".\c:"),
                (r".\c:\foo", r".\c:\foo"),
                (r".\c:foo", r".\c:foo"),
                (r"//abc", r"\\abc"),
                (r"//abc/", r"\\abc\"),
                (r"///abc", r"\\\abc"),
                (r"//abc//", r"\\abc\\"),
                (r"///abc/", r"\\\abc\"),
                // an element with a colon must not move to the front
                (r"a/../c:", r".\c:"),
                (r"a\..\c:", r".\c:"),
                (r"a/../c:/a", r".\c:\a"),
                (r"a/../../c:", r"..\c:"),
                (r"foo:bar", r"foo:bar"),
            ],
        );
    }

    #[test]
    fn test_dir() {
        let common = [
            ("", "."),
            (".", "."),
            ("/.", "/"),
            ("/", "/"),
            ("/foo", "/"),
            ("x/", "x"),
            ("abc", "."),
            ("abc/def", "abc"),
            ("a/b/.x", "a/b"),
            ("a/b/c.", "a/b"),
            ("a/b/c.x", "a/b"),
        ];
        check("dir", &posix(), dir, &common);
        check("dir", &posix(), dir, &[("////", "/")]);
        check(
            "dir",
            &windows(),
            dir,
            &[
                (r"c:\", r"c:\"),
                (r"c:.", r"c:."),
                (r"c:\a\b", r"c:\a"),
                (r"c:a\b", r"c:a"),
                (r"c:a\b\c", r"c:a\b"),
                (r"\\host\share", r"\\host\share"),
                (r"\\host\share\", r"\\host\share\"),
                (r"\\host\share\a", r"\\host\share\"),
                (r"\\host\share\a\b", r"\\host\share\a"),
                (r"\\\\", r"\\\\"),
            ],
        );
    }

    #[test]
    fn test_base() {
        check(
            "base",
            &posix(),
            base,
            &[
                ("", "."),
                (".", "."),
                ("/.", "."),
                ("/", "/"),
                ("////", "/"),
                ("x/", "x"),
                ("abc", "abc"),
                ("abc/def", "def"),
                ("a/b/.x", ".x"),
                ("a/b/c.", "c."),
                ("a/b/c.x", "c.x"),
            ],
        );
        check(
            "base",
            &windows(),
            base,
            &[
                (r"c:\", r"\"),
                (r"c:.", r"."),
                (r"c:\a\b", r"b"),
                (r"c:a\b", r"b"),
                (r"c:a\b\c", r"c"),
                (r"\\host\share\", r"\"),
                (r"\\host\share\a", r"a"),
                (r"\\host\share\a\b", r"b"),
            ],
        );
    }

    #[test]
    fn test_ext() {
        let provider = posix();
        let cases = [
            ("path.go", ".go"),
            ("path.pb.go", ".go"),
            ("a.dir/b", ""),
            ("a.dir/b.go", ".go"),
            ("a.dir/", ""),
            ("a/.bashrc", ""),
            ("a/.config.toml", ".toml"),
        ];
        for (path, expected) in cases {
            assert_eq!(provider.ext(path).unwrap(), expected, "{}", path);
        }
    }

    #[test]
    fn test_root() {
        let provider = posix();
        assert_eq!(provider.root("/gran/parent/child").unwrap(), "/");
        assert_eq!(provider.root("gran/parent").unwrap(), "");
        let provider = windows();
        assert_eq!(provider.root(r"c:\gran\parent\child").unwrap(), r"c:\");
        assert_eq!(
            provider.root(r"\\host\share\gran\parent\child").unwrap(),
            r"\\host\share"
        );
        let forward = windows().with_separator('/');
        assert_eq!(
            forward.root("//host/share/gran/parent/child").unwrap(),
            "//host/share"
        );
    }

    #[test]
    fn test_volume_name() {
        let provider = windows();
        assert_eq!(
            provider.volume_name("//host/share/gran/parent/child").unwrap(),
            r"\\host\share"
        );
        assert_eq!(
            provider.volume_name(r"\\host\share\gran\parent\child").unwrap(),
            r"\\host\share"
        );
        assert_eq!(provider.volume_name(r"c:\gran\parent\child").unwrap(), "c:");
        assert_eq!(posix().volume_name("/gran/parent/child").unwrap(), "");
    }

    #[test]
    fn test_rel_posix() {
        let provider = posix();
        let cases = [
            ("a/b", "a/b", "."),
            ("a/b/.", "a/b", "."),
            ("a/b", "a/b/.", "."),
            ("./a/b", "a/b", "."),
            ("a/b", "./a/b", "."),
            ("ab/cd", "ab/cde", "../cde"),
            ("ab/cd", "ab/c", "../c"),
            ("a/b", "a/b/c/d", "c/d"),
            ("a/b", "a/b/../c", "../c"),
            ("a/b/../c", "a/b", "../b"),
            ("a/b/c", "a/c/d", "../../c/d"),
            ("a/b", "c/d", "../../c/d"),
            ("a/b/c/d", "a/b", "../.."),
            ("a/b/c/d", "a/b/", "../.."),
            ("a/b/c/d/", "a/b", "../.."),
            ("a/b/c/d/", "a/b/", "../.."),
            ("../../a/b", "../../a/b/c/d", "c/d"),
            ("/a/b", "/a/b", "."),
            ("/a/b/.", "/a/b", "."),
            ("/a/b", "/a/b/.", "."),
            ("/ab/cd", "/ab/cde", "../cde"),
            ("/ab/cd", "/ab/c", "../c"),
            ("/a/b", "/a/b/c/d", "c/d"),
            ("/a/b", "/a/b/../c", "../c"),
            ("/a/b/../c", "/a/b", "../b"),
            ("/a/b/c", "/a/c/d", "../../c/d"),
            ("/a/b", "/c/d", "../../c/d"),
            ("/a/b/c/d", "/a/b", "../.."),
            ("/a/b/c/d", "/a/b/", "../.."),
            ("/a/b/c/d/", "/a/b", "../.."),
            ("/a/b/c/d/", "/a/b/", "../.."),
            ("/../../a/b", "/../../a/b/c/d", "c/d"),
            (".", "a/b", "a/b"),
            (".", "..", ".."),
        ];
        for (index, (source, target, expected)) in cases.iter().enumerate() {
            let actual = provider.rel(source, target).unwrap();
            assert_eq!(
                &actual, expected,
                "rel[{}] source '{}' target '{}'",
                index, source, target
            );
        }
    }

    #[test]
    fn test_rel_posix_cannot_be_done_lexically() {
        let provider = posix();
        let unresolvable = [("..", "."), ("..", "a"), ("../..", "..")];
        for (source, target) in unresolvable {
            let error = provider.rel(source, target).unwrap_err();
            assert!(
                matches!(error.kind(), ErrorKind::UnresolvableParent { .. }),
                "{} -> {}: {:?}",
                source,
                target,
                error
            );
        }
        let across = [("a", "/a"), ("/a", "a")];
        for (source, target) in across {
            let error = provider.rel(source, target).unwrap_err();
            assert!(
                matches!(error.kind(), ErrorKind::CrossVolume { .. }),
                "{} -> {}: {:?}",
                source,
                target,
                error
            );
        }
    }

    #[test]
    fn test_rel_windows() {
        let provider = windows();
        assert_eq!(provider.rel(r"C:a\b\c", "C:a/b/d").unwrap(), r"..\d");
        assert_eq!(provider.rel(r"C:\Projects", r"c:\projects\src").unwrap(), "src");
        assert_eq!(provider.rel(r"C:\Projects", r"c:\projects").unwrap(), ".");
        assert_eq!(provider.rel(r"C:\Projects\a\..", r"c:\projects").unwrap(), ".");
        assert_eq!(
            provider
                .rel(r"\\host\share", r"\\host\share\file.txt")
                .unwrap(),
            "file.txt"
        );
        for (source, target) in [
            (r"C:\", r"D:\"),
            ("C:", "D:"),
            (r"\\host\share\folder", r"\\other\test\share"),
        ] {
            let error = provider.rel(source, target).unwrap_err();
            assert!(
                matches!(error.kind(), ErrorKind::CrossVolume { .. }),
                "{} -> {}: {:?}",
                source,
                target,
                error
            );
        }
    }

    #[test]
    fn test_rel_case_sensitive_windows() {
        let provider = windows().with_comparison(Comparison::CaseSensitive);
        assert!(provider.rel(r"C:\Projects", r"c:\projects\src").is_err());
        assert_eq!(provider.rel(r"c:\Projects", r"c:\projects").unwrap(), r"..\projects");
    }

    #[test]
    fn test_rel_error_message() {
        let error = windows().rel(r"C:\", r"D:\").unwrap_err();
        expect![[r#"Cannot make 'D:/' relative to 'C:/': paths do not share a root"#]]
            .assert_eq(&error.to_string());
    }

    #[test]
    fn test_join() {
        let provider = posix();
        assert_eq!(provider.join(&["a", "b", "c"]).unwrap(), "a/b/c");
        assert_eq!(provider.join(&["a", "b/c"]).unwrap(), "a/b/c");
        assert_eq!(provider.join(&["a/b", "c"]).unwrap(), "a/b/c");
        assert_eq!(provider.join(&["a/b", "/c"]).unwrap(), "a/b/c");
        assert_eq!(provider.join(&["/a/b", "/c"]).unwrap(), "/a/b/c");
        assert_eq!(provider.join(&["", "a", "", "b"]).unwrap(), "a/b");
        assert_eq!(provider.join(&["a", ".."]).unwrap(), ".");
        let provider = windows();
        assert_eq!(provider.join(&[r"c:\", r"a\b", "c"]).unwrap(), r"c:\a\b\c");
        assert_eq!(provider.join(&["a", "../c:"]).unwrap(), r".\c:");
    }

    #[test]
    fn test_join_empty() {
        let provider = posix();
        let none: [&str; 0] = [];
        assert_eq!(provider.join(&none).unwrap(), "");
        assert_eq!(provider.join(&["", ""]).unwrap(), "");
    }

    #[test]
    fn test_join_accepts_owned_strings() {
        let elements = vec!["usr".to_string(), "local".to_string()];
        assert_eq!(posix().join(elements.as_slice()).unwrap(), "usr/local");
    }

    #[test]
    fn test_join_reports_single_parse_failure() {
        let error = posix().join(&["a", "b\0", "c"]).unwrap_err();
        assert!(matches!(error.kind(), ErrorKind::Parse { .. }));
    }

    #[test]
    fn test_join_aggregates_parse_failures() {
        let error = posix().join(&["\0a", "b", "c\0"]).unwrap_err();
        match error.kind() {
            ErrorKind::Multiple { errors, count } => {
                assert_eq!(*count, 2);
                assert_eq!(errors.len(), 2);
            }
            other => panic!("Expected Multiple, got {:?}", other),
        }
        expect![[r#"Multiple errors occurred (2 total): Invalid path '\0a': path contains a NUL character"#]]
            .assert_eq(&error.to_string());
    }

    #[test]
    fn test_abs() {
        let provider = posix();
        assert_eq!(provider.abs(".").unwrap(), "/working");
        assert_eq!(provider.abs("b/").unwrap(), "/working/b");
        assert_eq!(provider.abs("../a/b").unwrap(), "/a/b");
        assert_eq!(
            provider.abs("../a/b/./c/../../.././a/").unwrap(),
            "/a"
        );
        assert_eq!(provider.abs("/x/../y").unwrap(), "/y");

        let provider = windows();
        assert_eq!(provider.abs("b").unwrap(), r"c:\working\b");
        assert_eq!(provider.abs(r"..\a").unwrap(), r"c:\a");
        assert_eq!(provider.abs(r"d:\x\.\y").unwrap(), r"d:\x\y");
    }

    #[test]
    fn test_abs_follows_working_directory_changes() {
        let pal = MockPal::new().with_platform(Platform::Linux);
        let provider = Provider::new(PalHandle::new(pal.clone()));
        crosspath_base::Pal::change_directory(&pal, "/srv/app").unwrap();
        assert_eq!(provider.abs("data").unwrap(), "/srv/app/data");
    }

    #[test]
    fn test_abs_is_never_empty() {
        for platform in [Platform::Linux, Platform::Darwin, Platform::Windows] {
            let provider = Provider::new(PalHandle::new(MockPal::new().with_platform(platform)));
            for relative in [".", "b", "b/", "../a", "../a/b", "../a/b/./c/../../.././a/"] {
                let result = provider.abs(relative).unwrap();
                assert!(!result.is_empty(), "{:?} {}", platform, relative);
                assert!(provider.is_abs(&result).unwrap(), "{:?} {}", platform, result);
            }
        }
    }

    #[test]
    fn test_normalize() {
        let provider = windows();
        assert_eq!(
            provider.normalize(r"C:\Users\Fake\..\Shared/").unwrap(),
            r"c:\users\shared"
        );
        assert_eq!(provider.normalize("//Host/Share/A").unwrap(), r"\\host\share\a");
        let provider = posix();
        assert_eq!(provider.normalize("/Users/./Fake/").unwrap(), "/Users/Fake");
    }

    #[test]
    fn test_normalize_matches_equal_paths() {
        let provider = windows();
        let first = provider.normalize(r"C:\Projects\src").unwrap();
        let second = provider.normalize("c:/projects/src/").unwrap();
        assert_eq!(first, second);
        assert!(provider.equals(r"C:\Projects\src", "c:/projects/src/").unwrap());
    }

    #[test]
    fn test_split() {
        let provider = posix();
        assert_eq!(
            provider.split("/a/b/c.txt").unwrap(),
            ("/a/b/".to_string(), "c.txt".to_string())
        );
        assert_eq!(
            provider.split("a/").unwrap(),
            ("a/".to_string(), String::new())
        );
        assert_eq!(provider.split("/").unwrap(), ("/".to_string(), String::new()));
        let provider = windows();
        assert_eq!(
            provider.split("c:file").unwrap(),
            ("c:".to_string(), "file".to_string())
        );
    }

    #[test]
    fn test_parse_list() {
        let provider = windows();
        let paths = provider.parse_list(r"c:\bin;\\host\share\tools").unwrap();
        assert_eq!(paths.len(), 2);
        assert!(paths[1].volume().is_unc());
    }

    #[test]
    fn test_from_config() {
        let config = ProviderConfig::from_toml_str(
            r#"
            platform = "windows"
            separator = "/"
            comparison = "case_sensitive"
            "#,
        )
        .unwrap();
        let pal = PalHandle::new(MockPal::new().with_platform(Platform::Linux));
        let provider = Provider::from_config(pal, &config).unwrap();
        assert_eq!(provider.style(), PathStyle::Windows);
        assert_eq!(provider.separator(), '/');
        assert_eq!(provider.comparison(), Comparison::CaseSensitive);
        assert_eq!(provider.clean(r"c:\a\..\b").unwrap(), "c:/b");
    }

    #[test]
    fn test_from_config_defaults_to_pal_platform() {
        let pal = PalHandle::new(MockPal::new().with_platform(Platform::Windows));
        let provider = Provider::from_config(pal, &ProviderConfig::default()).unwrap();
        assert_eq!(provider.separator(), '\\');
        assert_eq!(provider.comparison(), Comparison::IgnoreCase);
        assert_eq!(provider.parser().list_separator(), ';');
    }

    #[test]
    fn test_from_config_rejects_conflicting_separators() {
        let pal = PalHandle::new(MockPal::new().with_platform(Platform::Linux));
        let config = ProviderConfig {
            list_separator: Some('/'),
            ..ProviderConfig::default()
        };
        let error = Provider::from_config(pal.clone(), &config).unwrap_err();
        expect![[r#"List separator '/' is also a path separator"#]].assert_eq(&error.to_string());

        let config = ProviderConfig {
            separator: Some('\\'),
            ..ProviderConfig::default()
        };
        let error = Provider::from_config(pal, &config).unwrap_err();
        expect![[r#"Separator '\' is not accepted by the Posix parser"#]]
            .assert_eq(&error.to_string());
    }

    #[test]
    fn test_custom_parser() {
        let provider = posix().with_parser(Parser::new(PathStyle::Posix).with_separators(['/', '|']));
        assert_eq!(provider.clean("a|b/../c").unwrap(), "a/c");
    }

    #[test]
    fn test_scenarios() {
        let provider = posix();
        assert_eq!(provider.clean("a/b/../c").unwrap(), "a/c");
        assert_eq!(provider.clean("").unwrap(), ".");

        let provider = windows();
        let unc = provider.parse("//host/share/a").unwrap();
        assert_eq!(unc.volume().host(), Some("host"));
        assert_eq!(unc.volume().share(), Some("share"));
        assert!(unc.is_abs());
        assert_eq!(unc.segments(), ["a"]);
        assert_eq!(provider.render(&unc), r"\\host\share\a");
        assert_eq!(provider.rel(r"C:\Projects", r"c:\projects\src").unwrap(), "src");
        assert!(matches!(
            provider.rel(r"C:\", r"D:\").unwrap_err().kind(),
            ErrorKind::CrossVolume { .. }
        ));
    }
}

#[cfg(test)]
mod provider_property_tests {
    use crate::{FilePath, Provider};
    use crosspath_base::{MockPal, PalHandle, Platform};

    const POSIX_CORPUS: &[&str] = &[
        "", ".", "..", "/", "a", "a/", "/a/b", "a//b/./c", "../../x", "/../y", "a/b/../../..",
        "./a/./b/", "x/y/z/../../w",
    ];

    const WINDOWS_CORPUS: &[&str] = &[
        r"c:",
        r"c:\.\x",
        r"c:a\..\..\b",
        r"C:\Users\..\Windows\",
        r"\\host\share",
        r"\\host\share\",
        r"\\host\share\a\..\b",
        r"//abc//",
        r"a/../c:",
        r"\rooted\path",
        r"relative\.\path\",
    ];

    fn providers() -> Vec<(Provider, &'static [&'static str])> {
        vec![
            (
                Provider::new(PalHandle::new(MockPal::new().with_platform(Platform::Linux))),
                POSIX_CORPUS,
            ),
            (
                Provider::new(PalHandle::new(MockPal::new().with_platform(Platform::Windows))),
                WINDOWS_CORPUS,
            ),
        ]
    }

    #[test]
    fn test_clean_is_idempotent() {
        for (provider, corpus) in providers() {
            for path in corpus {
                let once = provider.clean(path).unwrap();
                let twice = provider.clean(&once).unwrap();
                assert_eq!(once, twice, "{}", path);
            }
        }
    }

    #[test]
    fn test_clean_round_trips_through_render() {
        for (provider, corpus) in providers() {
            for path in corpus {
                let cleaned = provider.clean_path(&provider.parse(path).unwrap());
                let reparsed = provider.parse(&provider.render(&cleaned)).unwrap();
                assert_eq!(reparsed, cleaned, "{}", path);
            }
        }
    }

    #[test]
    fn test_rel_inverse_for_absolute_paths() {
        let cases: Vec<(Provider, &[(&str, &str)])> = vec![
            (
                Provider::new(PalHandle::new(MockPal::new().with_platform(Platform::Linux))),
                &[("/a/b", "/a/c/d"), ("/", "/x/y"), ("/x/y/z", "/"), ("/p/q", "/p/q/")],
            ),
            (
                Provider::new(PalHandle::new(MockPal::new().with_platform(Platform::Windows))),
                &[
                    (r"c:\a\b", r"C:\A\x"),
                    (r"\\h\s\one", r"\\h\s\two\three"),
                    (r"d:\", r"d:\deep\er"),
                ],
            ),
        ];
        for (provider, pairs) in cases {
            for (from, to) in pairs.iter() {
                let relative = provider.rel(from, to).unwrap();
                let rejoined = provider.join(&[*from, relative.as_str()]).unwrap();
                assert!(
                    provider.equals(&rejoined, to).unwrap(),
                    "{} -> {} via {} gave {}",
                    from,
                    to,
                    relative,
                    rejoined
                );
            }
        }
    }

    #[test]
    fn test_join_is_associative() {
        let provider =
            Provider::new(PalHandle::new(MockPal::new().with_platform(Platform::Linux)));
        let triples = [("a", "b/", "../c"), ("/x", "y", "z/.."), ("..", "..", "q"), ("", "m", "")];
        for (a, b, c) in triples {
            let left = provider
                .join(&[provider.join(&[a, b]).unwrap().as_str(), c])
                .unwrap();
            let right = provider
                .join(&[a, provider.join(&[b, c]).unwrap().as_str()])
                .unwrap();
            assert_eq!(left, right, "{} {} {}", a, b, c);
        }
    }

    #[test]
    fn test_base_and_dir_of_clean_path() {
        let provider =
            Provider::new(PalHandle::new(MockPal::new().with_platform(Platform::Linux)));
        let path = FilePath::absolute(["usr", "share", "doc"]);
        assert_eq!(provider.render(&path.dir()), "/usr/share");
        assert_eq!(provider.render(&path.base()), "doc");
    }
}
