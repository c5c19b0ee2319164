use super::{fatal, output};
use pretty_assertions::assert_eq;

const ANIMALS: &str = r#"
    class Animal {
        var name = "animal";
        var legs = 4;
        function Animal(n) { this.name = n; }
        function speak() { return this.name + " makes a sound"; }
        function describe() { return this.name + " has " + this.legs + " legs"; }
    }
    class Dog extends Animal {
        function Dog(n, tricks) { this.tricks = tricks; }
        function speak() { return this.name + " barks"; }
    }
"#;

#[test]
fn derived_members_override_ancestors() {
    let source = format!(
        "{ANIMALS}
        var d = new Dog(\"rex\", 3);
        println(d.speak());
        println(d.describe());
        println(d.tricks, \" \", d.__class);
        "
    );
    assert_eq!(output(&source), "rex barks\nrex has 4 legs\n3 Dog\n");
}

#[test]
fn ancestor_constructor_gets_leading_arguments() {
    let source = format!("{ANIMALS} var a = new Animal(\"cat\"); println(a.speak());");
    assert_eq!(output(&source), "cat makes a sound\n");
}

#[test]
fn instances_are_independent() {
    let source = r#"
        class Bag {
            var items = [];
            function add(x) { push(&this.items, x); }
        }
        var a = new Bag();
        var b = new Bag();
        a.add(1);
        a.add(2);
        b.add(3);
        println(count(a.items), count(b.items));
    "#;
    assert_eq!(output(source), "21\n");
}

#[test]
fn new_without_parentheses() {
    assert_eq!(
        output("class Empty { var tag = \"e\"; } var e = new Empty; println(e.tag);"),
        "e\n"
    );
}

#[test]
fn class_bodies_run_on_every_instantiation() {
    let source = r#"
        var serial = 0;
        class Ticket { var id = serial; }
        var first = new Ticket();
        serial = 5;
        var second = new Ticket();
        println(first.id, second.id);
    "#;
    assert_eq!(output(source), "05\n");
}

#[test]
fn static_calls_and_fields() {
    let source = r#"
        class MathUtil {
            var factor = 3;
            function triple(x) { return x * 3; }
        }
        println(MathUtil::triple(4), ",", MathUtil::factor, ",", typeof(MathUtil::missing));
    "#;
    assert_eq!(output(source), "12,3,void\n");
}

#[test]
fn static_call_has_no_this() {
    let source = r#"
        class Probe { function check() { return typeof(this); } }
        println(Probe::check());
    "#;
    assert_eq!(output(source), "void\n");
}

#[test]
fn static_call_of_a_missing_member() {
    assert_eq!(
        fatal("class C {}\nC::nope();"),
        "test.kite:2: call to undefined method C::nope()\n"
    );
}

#[test]
fn undefined_class() {
    assert_eq!(fatal("new Ghost();"), "test.kite:1: class 'Ghost' not found\n");
}

#[test]
fn missing_parent_class() {
    assert_eq!(
        fatal("class Orphan extends Nobody {}\nnew Orphan();"),
        "test.kite:2: class 'Nobody' not found\n"
    );
}

#[test]
fn cyclic_inheritance() {
    assert_eq!(
        fatal("class A extends B {}\nclass B extends A {}\nnew A();"),
        "test.kite:3: class 'A' inherits from itself\n"
    );
}

#[test]
fn classes_are_not_values() {
    assert_eq!(output("class K {} println(typeof(K));"), "void\n");
}
